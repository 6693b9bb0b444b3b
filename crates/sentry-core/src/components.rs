//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ALTITUDE_SAMPLES, MAX_TRAIL_POINTS};
use crate::enums::*;
use crate::types::{History, TargetId};

/// Immutable identity assigned at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: TargetId,
    pub kind: TargetKind,
    /// Display name drawn from the kind's model table.
    pub model: String,
    /// Threat assessment, fixed at creation.
    pub threat: ThreatLevel,
}

/// Polar motion state relative to the radar origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Kinematics {
    /// Degrees, always in [0, 360).
    pub bearing: f64,
    /// Range units, clamped to [MIN_RANGE, radar radius].
    pub range: f64,
    /// Degrees, interpreted mod 360.
    pub heading: f64,
    /// Range units per tick. Fixed at creation.
    pub speed: f64,
    /// Feet, clamped to the altitude envelope.
    pub altitude: f64,
}

/// Sensor attributes. Fixed at creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Signature {
    /// Radar cross section in square meters.
    pub radar_cross_section: f64,
    /// ELINT emitter frequency in MHz.
    pub elint_signature: u32,
}

/// IFF state of the track.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Iff {
    pub status: IffStatus,
}

/// Electronic countermeasure flags.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Countermeasures {
    pub jammed: bool,
    pub flared: bool,
}

/// Fire-control lock held by the operator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Lock {
    pub locked: bool,
}

/// Sweep paint bookkeeping.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Detection {
    /// Tick of the most recent paint. None until first painted.
    pub last_detected_tick: Option<u64>,
}

/// Pursuit assignment. Only interceptors carry this component.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Guidance {
    /// Id of the prey; a lookup key, not an owning reference.
    pub target: Option<TargetId>,
}

/// Trail and altitude samples for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackHistory {
    /// Cartesian trail points, oldest first.
    pub trail: History<DVec2>,
    /// Altitude samples (feet), oldest first.
    pub altitudes: History<f64>,
}

impl Default for TrackHistory {
    fn default() -> Self {
        Self {
            trail: History::with_capacity(MAX_TRAIL_POINTS),
            altitudes: History::with_capacity(MAX_ALTITUDE_SAMPLES),
        }
    }
}
