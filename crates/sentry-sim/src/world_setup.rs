//! Entity spawn factories for setting up the simulation world.
//!
//! Every target gets the same component bundle; interceptors additionally
//! carry a `Guidance` component. The roster maps stable ids to entities in
//! creation order and is the only way systems look targets up.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use sentry_core::components::*;
use sentry_core::constants::*;
use sentry_core::enums::*;
use sentry_core::types::{normalize_bearing, TargetId};

use crate::systems::classification;

/// Id → entity lookup, iterated in id (creation) order.
pub type Roster = BTreeMap<TargetId, Entity>;

/// Explicit placement for a scripted target.
#[derive(Debug, Clone, Copy)]
pub struct TargetSpawn {
    pub kind: TargetKind,
    pub bearing: f64,
    pub range: f64,
    pub heading: f64,
    pub speed: f64,
    pub altitude: f64,
}

/// Spawn the initial population: generic aircraft, then missiles, then interceptors.
pub fn spawn_population(
    world: &mut World,
    roster: &mut Roster,
    rng: &mut ChaCha8Rng,
    next_id: &mut u32,
    radar_radius: f64,
    counts: (usize, usize, usize),
) {
    let (generic, missiles, interceptors) = counts;
    for _ in 0..generic {
        spawn_random(world, roster, rng, next_id, radar_radius, None);
    }
    for _ in 0..missiles {
        spawn_random(world, roster, rng, next_id, radar_radius, Some(TargetKind::Missile));
    }
    for _ in 0..interceptors {
        spawn_random(
            world,
            roster,
            rng,
            next_id,
            radar_radius,
            Some(TargetKind::Interceptor),
        );
    }
}

/// Spawn one target at a random position. `kind = None` draws an aircraft kind.
pub fn spawn_random(
    world: &mut World,
    roster: &mut Roster,
    rng: &mut ChaCha8Rng,
    next_id: &mut u32,
    radar_radius: f64,
    kind: Option<TargetKind>,
) -> TargetId {
    let bearing = rng.gen_range(0.0..360.0);
    let range = match kind {
        Some(TargetKind::Interceptor) => radar_radius,
        _ => rng.gen_range(SPAWN_MIN_RANGE..=radar_radius.max(SPAWN_MIN_RANGE)),
    };
    let (lo, hi) = match kind {
        Some(TargetKind::Missile) => MISSILE_SPEED,
        Some(TargetKind::Interceptor) => INTERCEPTOR_SPEED,
        _ => AIRCRAFT_SPEED,
    };
    let speed = rng.gen_range(lo..hi);
    let (lo, hi) = match kind {
        Some(TargetKind::Missile | TargetKind::Interceptor) => MISSILE_SPAWN_ALTITUDE,
        _ => AIRCRAFT_SPAWN_ALTITUDE,
    };
    let altitude = rng.gen_range(lo..=hi).round();
    let heading = rng.gen_range(0.0..360.0);
    let kind = match kind {
        Some(kind) => kind,
        None => *TargetKind::AIRCRAFT
            .choose(rng)
            .unwrap_or(&TargetKind::Unknown),
    };

    spawn_target(
        world,
        roster,
        rng,
        next_id,
        radar_radius,
        TargetSpawn {
            kind,
            bearing,
            range,
            heading,
            speed,
            altitude,
        },
    )
}

/// Spawn a target at an explicit position. Model, signature, and threat
/// level are still drawn from the kind's tables.
pub fn spawn_target(
    world: &mut World,
    roster: &mut Roster,
    rng: &mut ChaCha8Rng,
    next_id: &mut u32,
    radar_radius: f64,
    spawn: TargetSpawn,
) -> TargetId {
    let id = TargetId(*next_id);
    *next_id += 1;

    let kind = spawn.kind;
    let model = kind.models().choose(rng).copied().unwrap_or("Unknown");
    let signature = match kind {
        TargetKind::Interceptor => Signature {
            radar_cross_section: INTERCEPTOR_RCS,
            elint_signature: 0,
        },
        TargetKind::Missile => Signature {
            radar_cross_section: MISSILE_RCS,
            elint_signature: MISSILE_ELINT,
        },
        TargetKind::Friend | TargetKind::Hostile | TargetKind::Unknown | TargetKind::Civilian => {
            Signature {
                radar_cross_section: rng.gen_range(AIRCRAFT_RCS.0..AIRCRAFT_RCS.1),
                elint_signature: rng.gen_range(AIRCRAFT_ELINT.0..=AIRCRAFT_ELINT.1),
            }
        }
    };
    let threat = classification::initial_threat(kind, rng);

    let identity = Identity {
        id,
        kind,
        model: model.to_string(),
        threat,
    };
    let kinematics = Kinematics {
        bearing: normalize_bearing(spawn.bearing),
        range: spawn.range.clamp(MIN_RANGE, radar_radius.max(MIN_RANGE)),
        heading: spawn.heading,
        speed: spawn.speed,
        altitude: spawn.altitude.clamp(MIN_ALTITUDE_FT, MAX_ALTITUDE_FT),
    };
    let iff = Iff {
        status: IffStatus::initial(kind),
    };

    let entity = world.spawn((
        identity,
        kinematics,
        signature,
        iff,
        Countermeasures::default(),
        Lock::default(),
        Detection::default(),
        TrackHistory::default(),
    ));
    if kind == TargetKind::Interceptor {
        // Bundles are tuples; the optional component goes on afterwards.
        let _ = world.insert_one(entity, Guidance::default());
    }

    roster.insert(id, entity);
    id
}
