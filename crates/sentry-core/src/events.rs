//! Events emitted by the simulation for the console log.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::TargetId;

/// A discrete state change worth logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    pub tick: u64,
    /// Simulation time (ms) at which the event occurred.
    pub time_ms: f64,
    pub kind: EventKind,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventKind {
    ModeChanged {
        mode: RadarMode,
    },
    IffResolved {
        target: TargetId,
        model: String,
        from: IffStatus,
        to: IffStatus,
    },
    JammingToggled {
        active: bool,
    },
    FlareToggled {
        active: bool,
    },
    WeatherToggled {
        active: bool,
    },
    ElintToggled {
        active: bool,
    },
    InterceptToggled {
        active: bool,
    },
    LockToggled {
        target: TargetId,
        model: String,
        locked: bool,
    },
    InterceptorLaunched {
        interceptor: TargetId,
        target: TargetId,
        model: String,
    },
    /// No idle interceptor was available for the requested target.
    InterceptorUnavailable {
        target: TargetId,
    },
    /// An interceptor closed within the hit radius; its assignment is cleared.
    InterceptorHit {
        interceptor: TargetId,
        target: TargetId,
    },
    TargetSelected {
        target: TargetId,
        model: String,
    },
    /// A command referenced a target that does not exist.
    InvalidTarget {
        target: TargetId,
    },
}

fn on_off(active: bool) -> &'static str {
    if active {
        "enabled"
    } else {
        "disabled"
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::ModeChanged { mode } => write!(f, "Mode set to {mode:?}"),
            EventKind::IffResolved {
                model, from, to, ..
            } => write!(f, "IFF: {model} changed from {from:?} to {to:?}"),
            EventKind::JammingToggled { active } => write!(f, "Jamming {}", on_off(*active)),
            EventKind::FlareToggled { active } => {
                write!(f, "Flares {}", if *active { "deployed" } else { "disabled" })
            }
            EventKind::WeatherToggled { active } => write!(f, "Weather radar {}", on_off(*active)),
            EventKind::ElintToggled { active } => write!(f, "ELINT {}", on_off(*active)),
            EventKind::InterceptToggled { active } => write!(f, "Intercept {}", on_off(*active)),
            EventKind::LockToggled { model, locked, .. } => {
                write!(f, "{model} {}", if *locked { "locked" } else { "unlocked" })
            }
            EventKind::InterceptorLaunched { model, .. } => {
                write!(f, "Interceptor launched at {model}")
            }
            EventKind::InterceptorUnavailable { target } => {
                write!(f, "No interceptor available for track {target}")
            }
            EventKind::InterceptorHit {
                interceptor,
                target,
            } => write!(f, "Interceptor {interceptor} reached track {target}"),
            EventKind::TargetSelected { model, .. } => write!(f, "Selected {model}"),
            EventKind::InvalidTarget { target } => write!(f, "No such track {target}"),
        }
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = (self.time_ms / 1000.0) as u64;
        write!(
            f,
            "[{:02}:{:02}:{:02}] {}",
            total / 3600,
            (total % 3600) / 60,
            total % 60,
            self.kind
        )
    }
}
