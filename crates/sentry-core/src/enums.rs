//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// What a simulated entity is. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Friend,
    Hostile,
    Unknown,
    Civilian,
    Missile,
    Interceptor,
}

impl TargetKind {
    /// Kinds drawn for the generic aircraft population.
    pub const AIRCRAFT: [TargetKind; 4] = [
        TargetKind::Friend,
        TargetKind::Hostile,
        TargetKind::Unknown,
        TargetKind::Civilian,
    ];

    /// Display models available for this kind.
    pub fn models(self) -> &'static [&'static str] {
        match self {
            TargetKind::Friend => &["F-16", "F-22", "C-130"],
            TargetKind::Hostile => &["MiG-29", "Su-35", "Tu-95"],
            TargetKind::Unknown => &["Unknown"],
            TargetKind::Civilian => &["Boeing 737", "Airbus A320"],
            TargetKind::Missile => &["SAM", "Cruise"],
            TargetKind::Interceptor => &["AIM-120"],
        }
    }

    /// Missiles and interceptors fly at fixed altitude and render as boxes.
    pub fn is_munition(self) -> bool {
        matches!(self, TargetKind::Missile | TargetKind::Interceptor)
    }
}

/// IFF interrogation status of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IffStatus {
    /// Awaiting interrogation. Only unknown aircraft start here.
    Pending,
    Friend,
    Hostile,
    Unknown,
    Civilian,
    Missile,
    Interceptor,
}

impl IffStatus {
    /// Initial status for a freshly created target.
    pub fn initial(kind: TargetKind) -> Self {
        match kind {
            TargetKind::Unknown => IffStatus::Pending,
            TargetKind::Friend => IffStatus::Friend,
            TargetKind::Hostile => IffStatus::Hostile,
            TargetKind::Civilian => IffStatus::Civilian,
            TargetKind::Missile => IffStatus::Missile,
            TargetKind::Interceptor => IffStatus::Interceptor,
        }
    }

    pub fn is_pending(self) -> bool {
        self == IffStatus::Pending
    }

    /// Single-letter prefix used in track labels.
    pub fn letter(self) -> char {
        match self {
            IffStatus::Pending => 'P',
            IffStatus::Friend => 'F',
            IffStatus::Hostile => 'H',
            IffStatus::Unknown => 'U',
            IffStatus::Civilian => 'C',
            IffStatus::Missile => 'M',
            IffStatus::Interceptor => 'I',
        }
    }
}

/// Threat assessment. Set once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreatLevel {
    Low,
    Med,
    High,
    Critical,
    Defense,
}

impl ThreatLevel {
    /// High and Critical threats drive the airspace alert level.
    pub fn is_severe(self) -> bool {
        matches!(self, ThreatLevel::High | ThreatLevel::Critical)
    }
}

/// Aggregate alert level over the tracked picture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AirspaceStatus {
    #[default]
    Green,
    Yellow,
    Red,
}

impl AirspaceStatus {
    /// Map a count of tracked severe threats to an alert level.
    pub fn from_severe_count(count: usize) -> Self {
        match count {
            0 => AirspaceStatus::Green,
            1..=3 => AirspaceStatus::Yellow,
            _ => AirspaceStatus::Red,
        }
    }
}

/// Radar display mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadarMode {
    /// All tracked targets are displayed.
    #[default]
    Search,
    /// Only the selected target is displayed.
    Track,
}

impl RadarMode {
    pub fn toggled(self) -> Self {
        match self {
            RadarMode::Search => RadarMode::Track,
            RadarMode::Track => RadarMode::Search,
        }
    }
}
