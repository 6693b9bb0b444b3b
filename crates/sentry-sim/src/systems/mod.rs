//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They do not own state: per-target state lives in components, global
//! console state in `SimulationState`.

pub mod classification;
pub mod ecm;
pub mod intercept;
pub mod kinematics;
pub mod snapshot;
pub mod sweep;
