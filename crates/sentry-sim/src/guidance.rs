//! Pursuit guidance for interceptors.
//!
//! Instantaneous pure pursuit: the interceptor always points at the prey's
//! current position, with no lead prediction.

use glam::DVec2;

use sentry_core::components::Kinematics;
use sentry_core::constants::INTERCEPT_HIT_RADIUS;
use sentry_core::types::{bearing_between, polar_to_cartesian};

/// Cartesian position of a target from its polar state.
pub fn position_of(kin: &Kinematics) -> DVec2 {
    polar_to_cartesian(kin.bearing, kin.range)
}

/// Heading (degrees) that points `from` straight at `to`.
pub fn pursuit_heading(from: DVec2, to: DVec2) -> f64 {
    bearing_between(from, to)
}

/// Whether two positions are close enough to count as a hit.
pub fn is_hit(a: DVec2, b: DVec2) -> bool {
    a.distance(b) < INTERCEPT_HIT_RADIUS
}

/// Result of one guidance step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitUpdate {
    pub heading: f64,
    pub hit: bool,
}

/// Steer an interceptor toward its prey.
pub fn pursue(interceptor: &Kinematics, prey: &Kinematics) -> PursuitUpdate {
    let own = position_of(interceptor);
    let target = position_of(prey);
    PursuitUpdate {
        heading: pursuit_heading(own, target),
        hit: is_hit(own, target),
    }
}
