//! Simulation snapshot: the complete read-only state published after each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{SimTime, TargetId};

/// Everything a renderer, HUD, or log sink may observe after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentrySnapshot {
    pub time: SimTime,
    /// Targets ordered by id.
    pub targets: Vec<TargetView>,
    pub radar: RadarView,
    pub console: ConsoleView,
    pub airspace: AirspaceStatus,
    /// Events raised since the previous snapshot, in order.
    pub events: Vec<SimEvent>,
}

impl SentrySnapshot {
    pub fn target(&self, id: TargetId) -> Option<&TargetView> {
        self.targets
            .binary_search_by_key(&id, |t| t.id)
            .ok()
            .map(|idx| &self.targets[idx])
    }

    /// Targets whose last paint is within the track timeout.
    pub fn tracked(&self) -> impl Iterator<Item = &TargetView> + Clone + '_ {
        self.targets.iter().filter(|t| t.tracked)
    }

    pub fn missile_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| t.kind == TargetKind::Missile)
            .count()
    }
}

/// One simulated entity as seen by consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub id: TargetId,
    pub kind: TargetKind,
    pub model: String,
    /// Degrees, [0, 360).
    pub bearing: f64,
    pub range: f64,
    /// Degrees.
    pub heading: f64,
    pub speed: f64,
    /// Feet.
    pub altitude: f64,
    pub radar_cross_section: f64,
    pub elint_signature: u32,
    pub iff_status: IffStatus,
    pub threat_level: ThreatLevel,
    pub jammed: bool,
    pub locked: bool,
    pub flared: bool,
    /// Prey of an interceptor, if assigned.
    pub guidance_target: Option<TargetId>,
    pub last_detected_ms: Option<f64>,
    /// Whether the target is inside the track timeout at snapshot time.
    pub tracked: bool,
    /// Cartesian trail, oldest first.
    pub trail: Vec<DVec2>,
    /// Altitude samples (feet), oldest first.
    pub altitude_history: Vec<f64>,
}

impl TargetView {
    /// Short track label, e.g. "H07".
    pub fn label(&self) -> String {
        format!("{}{}", self.iff_status.letter(), self.id)
    }
}

/// Radar sweep state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadarView {
    /// Degrees, [0, 360).
    pub sweep_angle: f64,
    pub radius: f64,
    pub mode: RadarMode,
}

/// Console flags set by operator commands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleView {
    pub jamming: bool,
    pub flare: bool,
    pub weather: bool,
    pub elint: bool,
    pub intercept: bool,
    /// A High/Critical target is locked.
    pub lock_warning: bool,
    pub selected: Option<TargetId>,
}
