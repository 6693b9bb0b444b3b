//! Simulation engine for SENTRY.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces `SentrySnapshot`s for the console.

pub mod config;
pub mod engine;
pub mod guidance;
pub mod systems;
pub mod world_setup;

pub use config::{ConfigError, SimConfig};
pub use engine::{SimulationEngine, SimulationState};
pub use sentry_core as core;

#[cfg(test)]
mod tests;
