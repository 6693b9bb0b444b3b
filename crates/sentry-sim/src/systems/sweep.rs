//! Radar sweep system.
//!
//! Advances the sweep, stamps targets inside the beam, and answers the two
//! visibility questions: is a target still tracked (freshness), and is it
//! painted on this particular display query (jam dropout). The dropout never
//! touches the freshness timestamp.

use hecs::World;
use rand::Rng;

use sentry_core::components::{Countermeasures, Detection, Kinematics};
use sentry_core::constants::*;
use sentry_core::types::{angular_distance, normalize_bearing};

/// Advance the sweep by one tick.
pub fn advance(sweep_angle: f64, increment_deg: f64) -> f64 {
    normalize_bearing(sweep_angle + increment_deg)
}

/// Whether a bearing lies inside the beam centred on the sweep.
pub fn in_beam(bearing: f64, sweep_angle: f64) -> bool {
    angular_distance(bearing, sweep_angle) < BEAM_HALF_WIDTH_DEG
}

/// Stamp every target inside the beam with the current tick.
pub fn paint(world: &mut World, sweep_angle: f64, now_tick: u64) {
    for (_entity, (kin, detection)) in world.query_mut::<(&Kinematics, &mut Detection)>() {
        if in_beam(kin.bearing, sweep_angle) {
            detection.last_detected_tick = Some(now_tick);
        }
    }
}

/// Freshness predicate: painted within the track timeout.
pub fn is_tracked(detection: &Detection, now_tick: u64) -> bool {
    detection
        .last_detected_tick
        .is_some_and(|at| now_tick.saturating_sub(at) < TRACK_TIMEOUT_TICKS)
}

/// Per-query dropout for jammed targets. Draws only when jammed.
pub fn paint_suppressed(countermeasures: &Countermeasures, rng: &mut impl Rng) -> bool {
    countermeasures.jammed && rng.gen_bool(JAM_PAINT_DROPOUT)
}
