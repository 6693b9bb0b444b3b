//! Operator commands sent from the console to the simulation.
//!
//! Commands are either applied immediately or queued for processing at
//! the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::TargetId;

/// All possible operator actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    // --- Electronic countermeasures ---
    /// Switch jamming on or off, re-rolling per-target jam state.
    ToggleJamming,
    /// Switch flares on or off, re-rolling per-target flare state.
    ToggleFlare,

    // --- Track management ---
    /// Interrogate a pending track.
    ResolveIff { target: TargetId },
    /// Toggle the fire-control lock on a track.
    ToggleLock { target: TargetId },
    /// Select a track for inspection.
    SelectTarget { target: TargetId },
    /// Drop the current selection.
    ClearSelection,

    // --- Engagement ---
    /// Assign the first idle interceptor to a track.
    LaunchIntercept { target: TargetId },
    /// Toggle the intercept indicator on the console.
    ToggleIntercept,

    // --- Console ---
    /// Switch between search and track display modes.
    ToggleRadarMode,
    /// Toggle the weather overlay.
    ToggleWeather,
    /// Toggle the ELINT overlay.
    ToggleElint,
}
