//! Target motion system.
//!
//! Motion is a simplified steering law in polar coordinates: the angular and
//! radial rates come from the misalignment between heading and bearing,
//! scaled by `KINEMATIC_DAMPING`. It is not cartesian kinematics.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use sentry_core::components::{Countermeasures, Identity, Kinematics, TrackHistory};
use sentry_core::constants::*;
use sentry_core::enums::TargetKind;
use sentry_core::types::{normalize_bearing, TargetId};

use crate::guidance::position_of;
use crate::systems::{ecm, intercept};
use crate::world_setup::Roster;

/// Notable outcomes of one motion pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionReport {
    /// (interceptor, prey) pairs that closed within the hit radius.
    pub hits: Vec<(TargetId, TargetId)>,
    /// Interceptors that fell inside the inner ring and relaunched.
    pub respawns: Vec<TargetId>,
}

/// Move every non-jammed target one tick, in id order.
pub fn run(
    world: &mut World,
    roster: &Roster,
    rng: &mut ChaCha8Rng,
    radar_radius: f64,
) -> MotionReport {
    let mut report = MotionReport::default();

    for (&id, &entity) in roster {
        let jammed = match world.get::<&Countermeasures>(entity) {
            Ok(cm) => cm.jammed,
            Err(_) => continue,
        };
        // Jammed targets are frozen in place.
        if jammed {
            continue;
        }

        if let Some(prey) = intercept::steer(world, roster, entity) {
            report.hits.push((id, prey));
        }

        let Ok((identity, kin, history, cm)) = world.query_one_mut::<(
            &Identity,
            &mut Kinematics,
            &mut TrackHistory,
            &mut Countermeasures,
        )>(entity) else {
            continue;
        };

        if integrate(kin, identity.kind, radar_radius) {
            report.respawns.push(id);
        }
        wander_altitude(kin, identity.kind, rng);
        if rng.gen_bool(HISTORY_SAMPLE_PROBABILITY) {
            history.trail.push(position_of(kin));
            history.altitudes.push(kin.altitude);
        }
        ecm::flare_coupling(cm, rng);
    }

    report
}

/// Apply one step of the steering law. Returns true if an interceptor
/// dropped inside the inner ring and was relaunched at maximum range.
pub fn integrate(kin: &mut Kinematics, kind: TargetKind, radar_radius: f64) -> bool {
    let misalignment = (kin.heading - kin.bearing).to_radians();
    let turn_rate = kin.speed * misalignment.cos() * KINEMATIC_DAMPING;
    let closure_rate = kin.speed * misalignment.sin() * KINEMATIC_DAMPING;

    kin.bearing = normalize_bearing(kin.bearing + turn_rate);
    let range = kin.range + closure_rate;

    // Respawn tests the unclamped range; clamping first would make it unreachable.
    let respawned = kind == TargetKind::Interceptor && range < MIN_RANGE;
    kin.range = if respawned {
        radar_radius
    } else {
        range.clamp(MIN_RANGE, radar_radius)
    };
    respawned
}

/// Aircraft wander in altitude; munitions hold theirs.
pub fn wander_altitude(kin: &mut Kinematics, kind: TargetKind, rng: &mut ChaCha8Rng) {
    let delta = if kind.is_munition() {
        0.0
    } else {
        let jitter = ALTITUDE_JITTER_FT as i32;
        rng.gen_range(-jitter..=jitter) as f64
    };
    kin.altitude = (kin.altitude + delta).clamp(MIN_ALTITUDE_FT, MAX_ALTITUDE_FT);
}
