//! Electronic countermeasures: jamming and flares.
//!
//! The console toggles are the only writers of `jammed`/`flared` apart
//! from the per-tick flare coupling. Switching a mode on re-rolls every
//! target independently; switching it off clears every target without
//! drawing. Flares can ignite jamming but never clear it.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use sentry_core::components::Countermeasures;
use sentry_core::constants::*;

use crate::world_setup::Roster;

/// Flip global jamming and re-roll each target's `jammed` flag.
/// Returns the new global state.
pub fn toggle_jamming(
    world: &mut World,
    roster: &Roster,
    jamming: &mut bool,
    rng: &mut ChaCha8Rng,
) -> bool {
    *jamming = !*jamming;
    let active = *jamming;
    reroll(world, roster, |cm| &mut cm.jammed, active, JAM_PROBABILITY, rng);
    active
}

/// Flip global flares and re-roll each target's `flared` flag.
pub fn toggle_flare(
    world: &mut World,
    roster: &Roster,
    flare: &mut bool,
    rng: &mut ChaCha8Rng,
) -> bool {
    *flare = !*flare;
    let active = *flare;
    reroll(world, roster, |cm| &mut cm.flared, active, FLARE_PROBABILITY, rng);
    active
}

fn reroll(
    world: &mut World,
    roster: &Roster,
    flag: impl Fn(&mut Countermeasures) -> &mut bool,
    active: bool,
    probability: f64,
    rng: &mut ChaCha8Rng,
) {
    // Roster order keeps the draw sequence reproducible.
    for &entity in roster.values() {
        if let Ok(mut cm) = world.get::<&mut Countermeasures>(entity) {
            *flag(&mut *cm) = active && rng.gen_bool(probability);
        }
    }
}

/// Per-tick coupling: a flared target may become jammed. One-way.
pub fn flare_coupling(cm: &mut Countermeasures, rng: &mut ChaCha8Rng) {
    if cm.flared && rng.gen_bool(FLARE_JAM_PROBABILITY) {
        cm.jammed = true;
    }
}
