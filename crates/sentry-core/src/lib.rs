//! Core types and definitions for the SENTRY airspace simulation.
//!
//! This crate defines the vocabulary shared by the engine and its
//! consumers: components, commands, snapshots, events, and constants.
//! It has no dependency on any rendering or runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
