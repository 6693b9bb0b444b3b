//! Tests for the simulation engine: clock ordering, sweep detection, ECM,
//! guidance, classification, and console commands.

use std::collections::BTreeSet;

use glam::DVec2;

use sentry_core::commands::Command;
use sentry_core::components::Countermeasures;
use sentry_core::constants::*;
use sentry_core::enums::*;
use sentry_core::events::EventKind;
use sentry_core::state::{SentrySnapshot, TargetView};
use sentry_core::types::*;

use crate::config::SimConfig;
use crate::engine::SimulationEngine;
use crate::guidance::pursuit_heading;
use crate::world_setup::TargetSpawn;

fn stationary(kind: TargetKind, bearing: f64, range: f64) -> TargetSpawn {
    TargetSpawn {
        kind,
        bearing,
        range,
        heading: bearing,
        speed: 0.0,
        altitude: 20_000.0,
    }
}

fn view(snap: &SentrySnapshot, id: TargetId) -> &TargetView {
    snap.target(id).expect("target present in snapshot")
}

fn jammed_ids(snap: &SentrySnapshot) -> BTreeSet<TargetId> {
    snap.targets.iter().filter(|t| t.jammed).map(|t| t.id).collect()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    for tick in 0..600 {
        if tick == 100 {
            engine_a.queue_command(Command::ToggleJamming);
            engine_b.queue_command(Command::ToggleJamming);
        }
        if tick == 200 {
            engine_a.queue_command(Command::ToggleFlare);
            engine_b.queue_command(Command::ToggleFlare);
        }
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed at tick {tick}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should produce different populations");
}

#[test]
fn test_display_queries_do_not_perturb_simulation() {
    let mut engine_a = SimulationEngine::new(SimConfig::default());
    let mut engine_b = SimulationEngine::new(SimConfig::default());
    engine_a.apply_command(Command::ToggleJamming);
    engine_b.apply_command(Command::ToggleJamming);

    for _ in 0..200 {
        for _ in 0..3 {
            engine_a.display_query();
        }
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b);
    }
}

// ---- Population ----

#[test]
fn test_initial_population() {
    let engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.snapshot();
    assert_eq!(snap.targets.len(), 27);
    assert_eq!(snap.missile_count(), 5);
    let interceptors = snap
        .targets
        .iter()
        .filter(|t| t.kind == TargetKind::Interceptor)
        .count();
    assert_eq!(interceptors, 2);

    for t in &snap.targets {
        assert_eq!(t.iff_status.is_pending(), t.kind == TargetKind::Unknown);
        let expected_threat = match t.kind {
            TargetKind::Friend | TargetKind::Civilian => Some(ThreatLevel::Low),
            TargetKind::Missile => Some(ThreatLevel::Critical),
            TargetKind::Interceptor => Some(ThreatLevel::Defense),
            TargetKind::Hostile | TargetKind::Unknown => None,
        };
        match expected_threat {
            Some(level) => assert_eq!(t.threat_level, level, "{:?}", t.kind),
            None => assert!(matches!(t.threat_level, ThreatLevel::Med | ThreatLevel::High)),
        }
        assert!(!t.tracked, "nothing is tracked before the first sweep");
    }
}

// ---- Invariants ----

#[test]
fn test_bounds_hold_every_tick() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 7,
        ..Default::default()
    });
    let radius = engine.radar_radius();

    for tick in 0..3000 {
        match tick {
            500 | 1500 => engine.queue_command(Command::ToggleJamming),
            700 | 2000 => engine.queue_command(Command::ToggleFlare),
            900 => engine.queue_commands([
                Command::LaunchIntercept { target: TargetId(20) },
                Command::LaunchIntercept { target: TargetId(21) },
            ]),
            _ => {}
        }
        let snap = engine.tick();
        for t in &snap.targets {
            assert!(
                (MIN_RANGE..=radius).contains(&t.range),
                "tick {tick}: range {} out of bounds for {}",
                t.range,
                t.id
            );
            assert!(
                (MIN_ALTITUDE_FT..=MAX_ALTITUDE_FT).contains(&t.altitude),
                "tick {tick}: altitude {} out of bounds",
                t.altitude
            );
            assert!((0.0..360.0).contains(&t.bearing), "bearing {}", t.bearing);
            assert!(t.trail.len() <= MAX_TRAIL_POINTS);
            assert!(t.altitude_history.len() <= MAX_ALTITUDE_SAMPLES);
        }
    }
}

#[test]
fn test_histories_fill_to_capacity() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut snap = engine.tick();
    for _ in 0..3000 {
        snap = engine.tick();
    }
    assert!(snap.targets.iter().any(|t| t.trail.len() == MAX_TRAIL_POINTS));
    assert!(snap
        .targets
        .iter()
        .any(|t| t.altitude_history.len() == MAX_ALTITUDE_SAMPLES));
}

#[test]
fn test_immutable_attributes_survive_run() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let before = engine.snapshot();
    engine.apply_command(Command::ToggleFlare);
    for _ in 0..1000 {
        engine.tick();
    }
    let after = engine.snapshot();
    for (a, b) in before.targets.iter().zip(&after.targets) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.model, b.model);
        assert_eq!(a.speed, b.speed);
        assert_eq!(a.radar_cross_section, b.radar_cross_section);
        assert_eq!(a.elint_signature, b.elint_signature);
        assert_eq!(a.threat_level, b.threat_level);
    }
}

// ---- Sweep ----

#[test]
fn test_sweep_advances_by_fixed_increment() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut prev = engine.snapshot().radar.sweep_angle;
    for _ in 0..700 {
        let snap = engine.tick();
        assert_eq!(
            snap.radar.sweep_angle,
            normalize_bearing(prev + SWEEP_INCREMENT_DEG)
        );
        assert!((0.0..360.0).contains(&snap.radar.sweep_angle));
        prev = snap.radar.sweep_angle;
    }
}

#[test]
fn test_paint_iff_inside_beam() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 3,
        ..Default::default()
    });
    for _ in 0..900 {
        let snap = engine.tick();
        let now = snap.time.elapsed_ms();
        for t in &snap.targets {
            let painted_now = t.last_detected_ms == Some(now);
            let inside = angular_distance(t.bearing, snap.radar.sweep_angle) < BEAM_HALF_WIDTH_DEG;
            assert_eq!(
                painted_now, inside,
                "target {} bearing {} sweep {}",
                t.id, t.bearing, snap.radar.sweep_angle
            );
        }
    }
}

#[test]
fn test_paint_wraps_through_north() {
    let mut engine = SimulationEngine::new(SimConfig::empty(1));
    let near_north = engine.spawn_target(stationary(TargetKind::Friend, 350.0, 300.0));
    let snap = engine.tick();
    // Sweep at 1.2 deg, target at 350: 11.2 deg apart across north.
    assert!(view(&snap, near_north).tracked);
}

#[test]
fn test_track_times_out() {
    let mut engine = SimulationEngine::new(SimConfig {
        sweep_increment_deg: 0.5,
        ..SimConfig::empty(1)
    });
    let id = engine.spawn_target(stationary(TargetKind::Friend, 20.0, 300.0));

    let mut snap = engine.tick();
    assert!(view(&snap, id).tracked);
    for _ in 1..200 {
        snap = engine.tick();
    }
    assert!(view(&snap, id).tracked, "painted ~1.5 s ago");
    for _ in 200..600 {
        snap = engine.tick();
    }
    let t = view(&snap, id);
    assert!(!t.tracked, "last paint was more than 6 s ago");
    let last = t.last_detected_ms.unwrap();
    assert!(snap.time.elapsed_ms() - last >= TRACK_TIMEOUT_MS);
}

#[test]
fn test_track_expires_exactly_at_timeout() {
    let mut engine = SimulationEngine::new(SimConfig {
        sweep_increment_deg: 0.5,
        ..SimConfig::empty(1)
    });
    let id = engine.spawn_target(stationary(TargetKind::Missile, 20.0, 300.0));

    // One pass of the beam over the target, then nothing for well over 6 s.
    let mut last_paint = None;
    for _ in 0..200 {
        let snap = engine.tick();
        if view(&snap, id).last_detected_ms == Some(snap.time.elapsed_ms()) {
            last_paint = Some(snap.time.tick);
        }
    }
    let last_paint = last_paint.expect("target painted during the first pass");

    let mut snap = engine.snapshot();
    while snap.time.tick < last_paint + TRACK_TIMEOUT_TICKS - 1 {
        snap = engine.tick();
    }
    assert!(view(&snap, id).tracked, "tick {} still inside window", snap.time.tick);
    assert_eq!(snap.airspace, AirspaceStatus::Yellow);
    assert_eq!(engine.display_query(), vec![id]);

    let snap = engine.tick();
    assert_eq!(snap.time.tick, last_paint + TRACK_TIMEOUT_TICKS);
    assert!(!view(&snap, id).tracked, "exactly 6000 ms after the paint");
    assert_eq!(snap.airspace, AirspaceStatus::Green);
    assert!(engine.display_query().is_empty());
}

#[test]
fn test_jammed_target_tracked_but_mostly_hidden() {
    let mut engine = SimulationEngine::new(SimConfig::empty(5));
    let id = engine.spawn_target(stationary(TargetKind::Hostile, 10.0, 300.0));
    engine.tick();

    let entity = engine.entity(id).unwrap();
    engine
        .world_mut()
        .get::<&mut Countermeasures>(entity)
        .unwrap()
        .jammed = true;

    let shown = (0..1000)
        .filter(|_| engine.display_query().contains(&id))
        .count();
    assert!((120..280).contains(&shown), "expected ~20% shown, got {shown}");

    let snap = engine.snapshot();
    assert!(view(&snap, id).tracked, "dropout must not touch freshness");
}

#[test]
fn test_track_mode_shows_selection_only() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut snap = engine.tick();
    for _ in 0..310 {
        snap = engine.tick();
    }
    let tracked: Vec<TargetId> = snap.tracked().map(|t| t.id).collect();
    assert!(!tracked.is_empty());
    assert_eq!(engine.display_query(), tracked);

    engine.apply_command(Command::ToggleRadarMode);
    engine.apply_command(Command::SelectTarget { target: TargetId(3) });
    let shown = engine.display_query();
    if view(&snap, TargetId(3)).tracked {
        assert_eq!(shown, vec![TargetId(3)]);
    } else {
        assert!(shown.is_empty());
    }

    engine.apply_command(Command::ClearSelection);
    assert!(engine.display_query().is_empty());
}

// ---- Airspace ----

fn airspace_with_missiles(missiles: usize) -> AirspaceStatus {
    let mut engine = SimulationEngine::new(SimConfig::empty(2));
    for _ in 0..4 {
        engine.spawn_target(stationary(TargetKind::Friend, 10.0, 300.0));
    }
    for _ in 0..missiles {
        engine.spawn_target(stationary(TargetKind::Missile, 10.0, 300.0));
    }
    // Far side of the scope: never painted on the first tick.
    for _ in 0..3 {
        engine.spawn_target(stationary(TargetKind::Missile, 180.0, 300.0));
    }
    engine.tick().airspace
}

#[test]
fn test_airspace_levels() {
    assert_eq!(airspace_with_missiles(0), AirspaceStatus::Green);
    assert_eq!(airspace_with_missiles(2), AirspaceStatus::Yellow);
    assert_eq!(airspace_with_missiles(4), AirspaceStatus::Red);
}

// ---- IFF ----

#[test]
fn test_resolve_iff_once() {
    let mut engine = SimulationEngine::new(SimConfig::empty(4));
    let id = engine.spawn_target(stationary(TargetKind::Unknown, 90.0, 300.0));
    assert_eq!(view(&engine.snapshot(), id).iff_status, IffStatus::Pending);

    engine.apply_command(Command::ResolveIff { target: id });
    let snap = engine.tick();
    let resolved = view(&snap, id).iff_status;
    assert!(matches!(resolved, IffStatus::Friend | IffStatus::Hostile));
    assert!(matches!(
        snap.events.as_slice(),
        [e] if matches!(e.kind, EventKind::IffResolved { from: IffStatus::Pending, .. })
    ));

    engine.apply_command(Command::ResolveIff { target: id });
    let snap = engine.tick();
    assert_eq!(view(&snap, id).iff_status, resolved);
    assert!(snap.events.is_empty(), "second resolve is a silent no-op");
}

#[test]
fn test_friend_scenario_500_ticks() {
    let mut engine = SimulationEngine::new(SimConfig {
        radar_radius: 1200.0,
        ..SimConfig::empty(2024)
    });
    let id = engine.spawn_target(TargetSpawn {
        kind: TargetKind::Friend,
        bearing: 45.0,
        range: 1000.0,
        heading: 45.0,
        speed: 2.0,
        altitude: 20_000.0,
    });

    for _ in 0..500 {
        let snap = engine.tick();
        let t = view(&snap, id);
        assert!((MIN_ALTITUDE_FT..=MAX_ALTITUDE_FT).contains(&t.altitude));
        assert!((MIN_RANGE..=1200.0).contains(&t.range));
        assert_eq!(t.iff_status, IffStatus::Friend);
        assert!(snap.events.is_empty());
    }
}

// ---- ECM ----

#[test]
fn test_jamming_rerolls_on_each_activation() {
    let mut engine = SimulationEngine::new(SimConfig::default());

    engine.apply_command(Command::ToggleJamming);
    let first = jammed_ids(&engine.snapshot());
    assert!(!first.is_empty());
    assert!(engine.state().jamming);

    engine.apply_command(Command::ToggleJamming);
    assert!(jammed_ids(&engine.snapshot()).is_empty());
    assert!(!engine.state().jamming);

    engine.apply_command(Command::ToggleJamming);
    let second = jammed_ids(&engine.snapshot());
    assert!(!second.is_empty());
    assert_ne!(first, second, "each activation rolls a fresh set");
}

#[test]
fn test_jammed_targets_are_frozen() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.apply_command(Command::ToggleJamming);
    let before = engine.snapshot();
    let mut after = engine.tick();
    for _ in 0..100 {
        after = engine.tick();
    }
    for (a, b) in before.targets.iter().zip(&after.targets) {
        if a.jammed {
            assert_eq!(a.bearing, b.bearing);
            assert_eq!(a.range, b.range);
            assert_eq!(a.altitude, b.altitude);
        }
    }
}

#[test]
fn test_flare_off_keeps_jam() {
    let mut engine = SimulationEngine::new(SimConfig {
        generic_count: 200,
        ..Default::default()
    });
    engine.apply_command(Command::ToggleFlare);
    for _ in 0..100 {
        engine.tick();
    }
    let jammed = jammed_ids(&engine.snapshot());
    assert!(!jammed.is_empty(), "flared targets should have ignited jamming");

    engine.apply_command(Command::ToggleFlare);
    let snap = engine.snapshot();
    assert!(snap.targets.iter().all(|t| !t.flared));
    assert_eq!(jammed_ids(&snap), jammed);
}

// ---- Guidance ----

#[test]
fn test_pursuit_heading_tracks_prey() {
    let mut engine = SimulationEngine::new(SimConfig::empty(6));
    let prey = engine.spawn_target(stationary(TargetKind::Hostile, 90.0, 500.0));
    let interceptor = engine.spawn_target(TargetSpawn {
        kind: TargetKind::Interceptor,
        bearing: 0.0,
        range: 500.0,
        heading: 0.0,
        speed: 25.0,
        altitude: 3000.0,
    });
    engine.apply_command(Command::LaunchIntercept { target: prey });
    let prey_pos = polar_to_cartesian(90.0, 500.0);

    let mut prev = engine.snapshot();
    assert_eq!(view(&prev, interceptor).guidance_target, Some(prey));

    for _ in 0..30 {
        let before = view(&prev, interceptor).clone();
        if before.guidance_target.is_none() {
            break;
        }
        let snap = engine.tick();
        let expected = pursuit_heading(polar_to_cartesian(before.bearing, before.range), prey_pos);
        let got = view(&snap, interceptor).heading;
        assert!(
            angular_distance(got, expected) < 1e-9,
            "heading {got} expected {expected}"
        );
        prev = snap;
    }
}

#[test]
fn test_hit_clears_assignment_keeps_prey() {
    let mut engine = SimulationEngine::new(SimConfig::empty(6));
    let prey = engine.spawn_target(stationary(TargetKind::Hostile, 90.0, 500.0));
    let interceptor = engine.spawn_target(stationary(TargetKind::Interceptor, 90.0, 510.0));
    engine.apply_command(Command::LaunchIntercept { target: prey });

    let snap = engine.tick();
    assert_eq!(view(&snap, interceptor).guidance_target, None);
    assert!(snap.events.iter().any(|e| e.kind
        == EventKind::InterceptorHit {
            interceptor,
            target: prey
        }));

    let t = view(&snap, prey);
    assert_eq!(t.range, 500.0);
    assert_eq!(snap.targets.len(), 2, "no target is ever removed");
}

#[test]
fn test_respawn_keeps_assignment() {
    let mut engine = SimulationEngine::new(SimConfig::empty(6));
    let radius = engine.radar_radius();
    // Directly "below" the interceptor: pursuit heading 270 drives range inward.
    let prey_pos = DVec2::new(101.0, -300.0);
    let prey = engine.spawn_target(stationary(
        TargetKind::Friend,
        bearing_between(DVec2::ZERO, prey_pos),
        prey_pos.length(),
    ));
    let interceptor = engine.spawn_target(TargetSpawn {
        kind: TargetKind::Interceptor,
        bearing: 0.0,
        range: 101.0,
        heading: 0.0,
        speed: 25.0,
        altitude: 3000.0,
    });
    engine.apply_command(Command::LaunchIntercept { target: prey });

    let snap = engine.tick();
    let t = view(&snap, interceptor);
    assert_eq!(t.range, radius);
    assert_eq!(t.guidance_target, Some(prey));
}

#[test]
fn test_launch_is_first_fit() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.apply_command(Command::LaunchIntercept { target: TargetId(0) });
    engine.apply_command(Command::LaunchIntercept { target: TargetId(1) });
    engine.apply_command(Command::LaunchIntercept { target: TargetId(2) });

    let snap = engine.snapshot();
    assert_eq!(view(&snap, TargetId(25)).guidance_target, Some(TargetId(0)));
    assert_eq!(view(&snap, TargetId(26)).guidance_target, Some(TargetId(1)));

    let kinds: Vec<&EventKind> = snap.events.iter().map(|e| &e.kind).collect();
    assert!(matches!(
        kinds.as_slice(),
        [
            EventKind::InterceptorLaunched { interceptor: TargetId(25), .. },
            EventKind::InterceptorLaunched { interceptor: TargetId(26), .. },
            EventKind::InterceptorUnavailable { target: TargetId(2) },
        ]
    ));
}

// ---- Console commands ----

#[test]
fn test_unknown_target_is_a_noop() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let before = serde_json::to_string(&engine.snapshot().targets).unwrap();
    for command in [
        Command::ResolveIff { target: TargetId(999) },
        Command::ToggleLock { target: TargetId(999) },
        Command::LaunchIntercept { target: TargetId(999) },
        Command::SelectTarget { target: TargetId(999) },
    ] {
        engine.apply_command(command);
    }
    let snap = engine.snapshot();
    assert_eq!(serde_json::to_string(&snap.targets).unwrap(), before);
    assert_eq!(snap.events.len(), 4);
    assert!(snap
        .events
        .iter()
        .all(|e| e.kind == EventKind::InvalidTarget { target: TargetId(999) }));
    assert_eq!(snap.console.selected, None);
}

#[test]
fn test_lock_warning_follows_threat() {
    let mut engine = SimulationEngine::new(SimConfig::empty(8));
    let missile = engine.spawn_target(stationary(TargetKind::Missile, 0.0, 300.0));
    let friend = engine.spawn_target(stationary(TargetKind::Friend, 0.0, 300.0));

    engine.apply_command(Command::ToggleLock { target: missile });
    assert!(engine.state().lock_warning);
    engine.apply_command(Command::ToggleLock { target: friend });
    assert!(!engine.state().lock_warning);

    let snap = engine.snapshot();
    assert!(view(&snap, missile).locked);
    assert!(view(&snap, friend).locked);

    engine.apply_command(Command::ToggleLock { target: missile });
    assert!(!view(&engine.snapshot(), missile).locked);
}

#[test]
fn test_queued_commands_apply_at_next_tick() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([Command::ToggleWeather, Command::ToggleElint]);
    assert!(!engine.state().weather);

    let snap = engine.tick();
    assert!(snap.console.weather);
    assert!(snap.console.elint);
    assert_eq!(snap.events.len(), 2);
    for event in &snap.events {
        assert_eq!(event.tick, snap.time.tick, "stamped with the delivering tick");
        assert_eq!(event.time_ms, snap.time.elapsed_ms());
    }

    let snap = engine.tick();
    assert!(snap.events.is_empty(), "events are delivered once");
}

#[test]
fn test_mode_and_console_toggles() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.apply_command(Command::ToggleRadarMode);
    engine.apply_command(Command::ToggleIntercept);
    let snap = engine.tick();
    assert_eq!(snap.radar.mode, RadarMode::Track);
    assert!(snap.console.intercept);
    assert_eq!(
        snap.events[0].kind,
        EventKind::ModeChanged {
            mode: RadarMode::Track
        }
    );

    engine.apply_command(Command::ToggleRadarMode);
    assert_eq!(engine.snapshot().radar.mode, RadarMode::Search);
}

// ---- Configuration ----

#[test]
fn test_non_finite_radius_falls_back_to_default() {
    for radius in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let mut engine = SimulationEngine::new(SimConfig {
            radar_radius: radius,
            ..Default::default()
        });
        assert_eq!(engine.radar_radius(), DEFAULT_RADAR_RADIUS, "radius {radius}");
        for _ in 0..60 {
            let snap = engine.tick();
            assert_eq!(snap.targets.len(), 27);
            assert!(snap
                .targets
                .iter()
                .all(|t| (MIN_RANGE..=DEFAULT_RADAR_RADIUS).contains(&t.range)));
        }
    }
}

#[test]
fn test_small_radius_floored_at_spawn_range() {
    let mut engine = SimulationEngine::new(SimConfig {
        radar_radius: 10.0,
        ..Default::default()
    });
    assert_eq!(engine.radar_radius(), SPAWN_MIN_RANGE);
    let snap = engine.tick();
    assert!(snap.targets.iter().all(|t| t.range <= SPAWN_MIN_RANGE));
}
