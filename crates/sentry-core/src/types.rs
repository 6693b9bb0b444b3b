//! Fundamental geometric and simulation types.
//!
//! Polar coordinates are measured from the radar origin: bearing in degrees
//! counter-clockwise from the +x axis, range in display units. Cartesian
//! positions use x = East, y = North.

use std::collections::VecDeque;
use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Stable target identifier, assigned from a monotonic counter at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick. Elapsed time is derived from the tick count,
    /// never accumulated.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 / crate::constants::TICK_RATE as f64;
    }

    /// Elapsed simulation time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        ticks_to_ms(self.tick)
    }
}

/// Simulation time (ms) at the start of `tick`.
pub fn ticks_to_ms(tick: u64) -> f64 {
    tick as f64 * 1000.0 / crate::constants::TICK_RATE as f64
}

/// Wrap an angle in degrees into [0, 360).
pub fn normalize_bearing(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Shortest angular separation between two bearings, in [0, 180].
pub fn angular_distance(a_deg: f64, b_deg: f64) -> f64 {
    let diff = (a_deg - b_deg).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

/// Cartesian position of a polar (bearing, range) pair.
pub fn polar_to_cartesian(bearing_deg: f64, range: f64) -> DVec2 {
    let (sin, cos) = bearing_deg.to_radians().sin_cos();
    DVec2::new(range * cos, range * sin)
}

/// Bearing in degrees [0, 360) of the vector from `from` to `to`.
pub fn bearing_between(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    normalize_bearing(d.y.atan2(d.x).to_degrees())
}

/// Fixed-capacity history that evicts its oldest entry when full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `value`, dropping the oldest entry if capacity is exceeded.
    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> History<T> {
    /// Copy out the entries, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}
