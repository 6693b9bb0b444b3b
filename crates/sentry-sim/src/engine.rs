//! Simulation engine: the clock that drives every tick.
//!
//! `SimulationEngine` owns the hecs ECS world, applies operator commands,
//! runs all systems, and produces `SentrySnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use sentry_core::commands::Command;
use sentry_core::components::{Countermeasures, Detection, Iff, Identity, Lock};
use sentry_core::constants::{DEFAULT_RADAR_RADIUS, SPAWN_MIN_RANGE, SWEEP_INCREMENT_DEG};
use sentry_core::enums::{AirspaceStatus, RadarMode};
use sentry_core::events::{EventKind, SimEvent};
use sentry_core::state::SentrySnapshot;
use sentry_core::types::{SimTime, TargetId};

use crate::config::SimConfig;
use crate::systems;
use crate::world_setup::{self, Roster, TargetSpawn};

/// Display queries draw from their own stream so UI polling never shifts
/// the simulation's draw sequence.
const DISPLAY_RNG_STREAM: u64 = 1;

/// Non-finite radii fall back to the default; finite ones are floored at the
/// spawn range so the spawn interval is never empty.
fn sanitize_radius(radius: f64) -> f64 {
    if radius.is_finite() {
        radius.max(SPAWN_MIN_RANGE)
    } else {
        DEFAULT_RADAR_RADIUS
    }
}

/// Global console and radar state, passed explicitly to systems.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationState {
    /// Degrees, [0, 360).
    pub sweep_angle: f64,
    pub mode: RadarMode,
    pub jamming: bool,
    pub flare: bool,
    pub weather: bool,
    pub elint: bool,
    pub intercept: bool,
    pub lock_warning: bool,
    pub selected: Option<TargetId>,
    pub airspace: AirspaceStatus,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    roster: Roster,
    state: SimulationState,
    time: SimTime,
    rng: ChaCha8Rng,
    display_rng: ChaCha8Rng,
    next_target_id: u32,
    radar_radius: f64,
    sweep_increment_deg: f64,
    command_queue: VecDeque<Command>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a new engine and spawn the initial population.
    pub fn new(config: SimConfig) -> Self {
        let mut display_rng = ChaCha8Rng::seed_from_u64(config.seed);
        display_rng.set_stream(DISPLAY_RNG_STREAM);

        let sweep_increment_deg =
            if config.sweep_increment_deg > 0.0 && config.sweep_increment_deg < 360.0 {
                config.sweep_increment_deg
            } else {
                SWEEP_INCREMENT_DEG
            };

        let mut engine = Self {
            world: World::new(),
            roster: Roster::new(),
            state: SimulationState::default(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            display_rng,
            next_target_id: 0,
            radar_radius: sanitize_radius(config.radar_radius),
            sweep_increment_deg,
            command_queue: VecDeque::new(),
            events: Vec::new(),
        };

        world_setup::spawn_population(
            &mut engine.world,
            &mut engine.roster,
            &mut engine.rng,
            &mut engine.next_target_id,
            engine.radar_radius,
            (
                config.generic_count,
                config.missile_count,
                config.interceptor_count,
            ),
        );
        debug!(
            targets = engine.roster.len(),
            seed = config.seed,
            "simulation initialised"
        );
        engine
    }

    /// Add a scripted target at an explicit position.
    pub fn spawn_target(&mut self, spawn: TargetSpawn) -> TargetId {
        world_setup::spawn_target(
            &mut self.world,
            &mut self.roster,
            &mut self.rng,
            &mut self.next_target_id,
            self.radar_radius,
            spawn,
        )
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: Command) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// The clock advances first, so events from queued commands carry the
    /// tick of the snapshot that delivers them.
    pub fn tick(&mut self) -> SentrySnapshot {
        self.time.advance();
        self.process_commands();
        self.run_systems();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.roster,
            &self.state,
            &self.time,
            self.radar_radius,
            events,
        )
    }

    /// Current state without advancing. Pending events are included but
    /// not consumed; the next `tick` still delivers them.
    pub fn snapshot(&self) -> SentrySnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.roster,
            &self.state,
            &self.time,
            self.radar_radius,
            self.events.clone(),
        )
    }

    /// Ids renderable on this display frame, in id order.
    ///
    /// Applies the track-mode filter, the freshness window, and the jam
    /// dropout. Each call draws fresh dropout rolls.
    pub fn display_query(&mut self) -> Vec<TargetId> {
        let now_tick = self.time.tick;
        let mut visible = Vec::new();
        for (&id, &entity) in &self.roster {
            if self.state.mode == RadarMode::Track && self.state.selected != Some(id) {
                continue;
            }
            let Ok((detection, cm)) = self
                .world
                .query_one_mut::<(&Detection, &Countermeasures)>(entity)
            else {
                continue;
            };
            if !systems::sweep::is_tracked(detection, now_tick) {
                continue;
            }
            if systems::sweep::paint_suppressed(cm, &mut self.display_rng) {
                continue;
            }
            visible.push(id);
        }
        visible
    }

    /// Global console and radar state.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn radar_radius(&self) -> f64 {
        self.radar_radius
    }

    /// Mutable world access for scripted scenarios.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Look up the entity behind a target id.
    pub fn entity(&self, id: TargetId) -> Option<hecs::Entity> {
        self.roster.get(&id).copied()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.apply_command(command);
        }
    }

    /// Apply a command immediately. Policy violations are no-ops that may
    /// raise an event; nothing here can fail. Events raised outside `tick`
    /// are stamped with the last completed tick.
    pub fn apply_command(&mut self, command: Command) {
        debug!(?command, tick = self.time.tick, "command");
        match command {
            Command::ToggleJamming => {
                let active = systems::ecm::toggle_jamming(
                    &mut self.world,
                    &self.roster,
                    &mut self.state.jamming,
                    &mut self.rng,
                );
                info!(active, "jamming toggled");
                self.emit(EventKind::JammingToggled { active });
            }
            Command::ToggleFlare => {
                let active = systems::ecm::toggle_flare(
                    &mut self.world,
                    &self.roster,
                    &mut self.state.flare,
                    &mut self.rng,
                );
                info!(active, "flares toggled");
                self.emit(EventKind::FlareToggled { active });
            }
            Command::ResolveIff { target } => {
                let Some(entity) = self.lookup(target) else {
                    return;
                };
                let Ok((identity, iff)) = self.world.query_one_mut::<(&Identity, &mut Iff)>(entity)
                else {
                    return;
                };
                if let Some((from, to)) = systems::classification::resolve_iff(iff, &mut self.rng)
                {
                    let model = identity.model.clone();
                    info!(%target, ?from, ?to, "IFF resolved");
                    self.emit(EventKind::IffResolved {
                        target,
                        model,
                        from,
                        to,
                    });
                }
            }
            Command::ToggleLock { target } => {
                let Some(entity) = self.lookup(target) else {
                    return;
                };
                let Ok((identity, lock)) = self.world.query_one_mut::<(&Identity, &mut Lock)>(entity)
                else {
                    return;
                };
                lock.locked = !lock.locked;
                let locked = lock.locked;
                let model = identity.model.clone();
                self.state.lock_warning = locked && identity.threat.is_severe();
                if self.state.lock_warning {
                    warn!(%target, "threat lock");
                }
                self.emit(EventKind::LockToggled {
                    target,
                    model,
                    locked,
                });
            }
            Command::SelectTarget { target } => {
                let Some(entity) = self.lookup(target) else {
                    return;
                };
                let model = match self.world.get::<&Identity>(entity) {
                    Ok(identity) => identity.model.clone(),
                    Err(_) => return,
                };
                self.state.selected = Some(target);
                self.emit(EventKind::TargetSelected { target, model });
            }
            Command::ClearSelection => {
                self.state.selected = None;
            }
            Command::LaunchIntercept { target } => {
                let Some(entity) = self.lookup(target) else {
                    return;
                };
                let model = match self.world.get::<&Identity>(entity) {
                    Ok(identity) => identity.model.clone(),
                    Err(_) => return,
                };
                match systems::intercept::assign(&mut self.world, &self.roster, target) {
                    Some(interceptor) => {
                        info!(%interceptor, %target, "interceptor launched");
                        self.emit(EventKind::InterceptorLaunched {
                            interceptor,
                            target,
                            model,
                        });
                    }
                    None => {
                        warn!(%target, "no interceptor available");
                        self.emit(EventKind::InterceptorUnavailable { target });
                    }
                }
            }
            Command::ToggleIntercept => {
                self.state.intercept = !self.state.intercept;
                let active = self.state.intercept;
                self.emit(EventKind::InterceptToggled { active });
            }
            Command::ToggleRadarMode => {
                self.state.mode = self.state.mode.toggled();
                let mode = self.state.mode;
                info!(?mode, "radar mode");
                self.emit(EventKind::ModeChanged { mode });
            }
            Command::ToggleWeather => {
                self.state.weather = !self.state.weather;
                let active = self.state.weather;
                self.emit(EventKind::WeatherToggled { active });
            }
            Command::ToggleElint => {
                self.state.elint = !self.state.elint;
                let active = self.state.elint;
                self.emit(EventKind::ElintToggled { active });
            }
        }
    }

    /// Resolve a command's target, raising `InvalidTarget` if it is unknown.
    fn lookup(&mut self, target: TargetId) -> Option<hecs::Entity> {
        let entity = self.roster.get(&target).copied();
        if entity.is_none() {
            warn!(%target, "command references unknown target");
            self.emit(EventKind::InvalidTarget { target });
        }
        entity
    }

    fn emit(&mut self, kind: EventKind) {
        self.events.push(SimEvent {
            tick: self.time.tick,
            time_ms: self.time.elapsed_ms(),
            kind,
        });
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now_tick = self.time.tick;

        // 1. Sweep advance
        self.state.sweep_angle =
            systems::sweep::advance(self.state.sweep_angle, self.sweep_increment_deg);
        // 2. Guidance + motion + flare coupling, per target in id order
        let report = systems::kinematics::run(
            &mut self.world,
            &self.roster,
            &mut self.rng,
            self.radar_radius,
        );
        for (interceptor, target) in report.hits {
            debug!(%interceptor, %target, "interceptor hit");
            self.emit(EventKind::InterceptorHit {
                interceptor,
                target,
            });
        }
        for interceptor in report.respawns {
            debug!(%interceptor, "interceptor relaunched at maximum range");
        }
        // 3. Sweep paint on post-motion bearings
        systems::sweep::paint(&mut self.world, self.state.sweep_angle, now_tick);
        // 4. Airspace status over the tracked set
        self.state.airspace = systems::classification::airspace_status(&self.world, now_tick);
    }
}
