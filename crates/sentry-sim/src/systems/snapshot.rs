//! Snapshot system: reads the ECS world and builds a complete SentrySnapshot.
//!
//! Read-only: it never modifies the world.

use hecs::World;

use sentry_core::components::*;
use sentry_core::events::SimEvent;
use sentry_core::state::*;
use sentry_core::types::{ticks_to_ms, SimTime};

use crate::engine::SimulationState;
use crate::systems::sweep;
use crate::world_setup::Roster;

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    roster: &Roster,
    state: &SimulationState,
    time: &SimTime,
    radar_radius: f64,
    events: Vec<SimEvent>,
) -> SentrySnapshot {
    SentrySnapshot {
        time: *time,
        targets: build_targets(world, roster, time.tick),
        radar: RadarView {
            sweep_angle: state.sweep_angle,
            radius: radar_radius,
            mode: state.mode,
        },
        console: ConsoleView {
            jamming: state.jamming,
            flare: state.flare,
            weather: state.weather,
            elint: state.elint,
            intercept: state.intercept,
            lock_warning: state.lock_warning,
            selected: state.selected,
        },
        airspace: state.airspace,
        events,
    }
}

/// Build TargetViews in roster (id) order.
fn build_targets(world: &World, roster: &Roster, now_tick: u64) -> Vec<TargetView> {
    roster
        .values()
        .filter_map(|&entity| {
            let mut query = world
                .query_one::<(
                    &Identity,
                    &Kinematics,
                    &Signature,
                    &Iff,
                    &Countermeasures,
                    &Lock,
                    &Detection,
                    &TrackHistory,
                    Option<&Guidance>,
                )>(entity)
                .ok()?;
            let (identity, kin, signature, iff, cm, lock, detection, history, guidance) =
                query.get()?;
            Some(TargetView {
                id: identity.id,
                kind: identity.kind,
                model: identity.model.clone(),
                bearing: kin.bearing,
                range: kin.range,
                heading: kin.heading,
                speed: kin.speed,
                altitude: kin.altitude,
                radar_cross_section: signature.radar_cross_section,
                elint_signature: signature.elint_signature,
                iff_status: iff.status,
                threat_level: identity.threat,
                jammed: cm.jammed,
                locked: lock.locked,
                flared: cm.flared,
                guidance_target: guidance.and_then(|g| g.target),
                last_detected_ms: detection.last_detected_tick.map(ticks_to_ms),
                tracked: sweep::is_tracked(detection, now_tick),
                trail: history.trail.to_vec(),
                altitude_history: history.altitudes.to_vec(),
            })
        })
        .collect()
}
