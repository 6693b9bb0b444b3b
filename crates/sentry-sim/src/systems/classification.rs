//! IFF resolution, threat assessment, and airspace status.

use hecs::World;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use sentry_core::components::{Detection, Iff, Identity};
use sentry_core::enums::*;

use crate::systems::sweep;

/// Threat level assigned once at creation.
pub fn initial_threat(kind: TargetKind, rng: &mut ChaCha8Rng) -> ThreatLevel {
    match kind {
        TargetKind::Friend | TargetKind::Civilian => ThreatLevel::Low,
        TargetKind::Hostile | TargetKind::Unknown => *[ThreatLevel::Med, ThreatLevel::High]
            .choose(rng)
            .unwrap_or(&ThreatLevel::Med),
        TargetKind::Missile => ThreatLevel::Critical,
        TargetKind::Interceptor => ThreatLevel::Defense,
    }
}

/// Interrogate a pending track. Returns `(from, to)` on transition;
/// resolved tracks are terminal and return `None` without drawing.
pub fn resolve_iff(iff: &mut Iff, rng: &mut ChaCha8Rng) -> Option<(IffStatus, IffStatus)> {
    if !iff.status.is_pending() {
        return None;
    }
    let from = iff.status;
    let to = *[IffStatus::Friend, IffStatus::Hostile]
        .choose(rng)
        .unwrap_or(&IffStatus::Hostile);
    iff.status = to;
    Some((from, to))
}

/// Count severe threats among the given threat levels.
pub fn severe_count(threats: impl IntoIterator<Item = ThreatLevel>) -> usize {
    threats.into_iter().filter(|t| t.is_severe()).count()
}

/// Alert level over the currently tracked targets. No hysteresis.
pub fn airspace_status(world: &World, now_tick: u64) -> AirspaceStatus {
    let mut query = world.query::<(&Identity, &Detection)>();
    let tracked = query
        .iter()
        .filter(|(_, (_, detection))| sweep::is_tracked(detection, now_tick))
        .map(|(_, (identity, _))| identity.threat);
    AirspaceStatus::from_severe_count(severe_count(tracked))
}
