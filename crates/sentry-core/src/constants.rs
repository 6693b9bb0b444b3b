//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Radar ---

/// Default radar display radius in range units (0.55 of a 1080-line screen).
pub const DEFAULT_RADAR_RADIUS: f64 = 594.0;

/// Sweep advance per tick (degrees).
pub const SWEEP_INCREMENT_DEG: f64 = 1.2;

/// Angular tolerance within which the sweep paints a target (degrees).
pub const BEAM_HALF_WIDTH_DEG: f64 = 35.0;

/// A target stays tracked for this long after its last paint (milliseconds).
pub const TRACK_TIMEOUT_MS: f64 = 6000.0;

/// `TRACK_TIMEOUT_MS` at `TICK_RATE`. Freshness is compared in whole ticks.
pub const TRACK_TIMEOUT_TICKS: u64 = 360;

/// Chance that a jammed target is hidden from a single display query.
pub const JAM_PAINT_DROPOUT: f64 = 0.8;

// --- Kinematics ---

/// Inner range limit (range units).
pub const MIN_RANGE: f64 = 100.0;

/// Minimum spawn range for non-interceptor targets.
pub const SPAWN_MIN_RANGE: f64 = 150.0;

/// Damping applied to the turn and closure rates.
pub const KINEMATIC_DAMPING: f64 = 0.08;

/// Altitude envelope (feet).
pub const MIN_ALTITUDE_FT: f64 = 500.0;
pub const MAX_ALTITUDE_FT: f64 = 50_000.0;

/// Maximum per-tick altitude wander for aircraft (feet).
pub const ALTITUDE_JITTER_FT: f64 = 150.0;

/// Per-tick chance of recording a trail point and altitude sample.
pub const HISTORY_SAMPLE_PROBABILITY: f64 = 0.04;

/// Trail capacity (cartesian points).
pub const MAX_TRAIL_POINTS: usize = 15;

/// Altitude history capacity (samples).
pub const MAX_ALTITUDE_SAMPLES: usize = 50;

// --- ECM ---

/// Chance per target of being jammed when jamming is switched on.
pub const JAM_PROBABILITY: f64 = 0.6;

/// Chance per target of deploying flares when flares are switched on.
pub const FLARE_PROBABILITY: f64 = 0.3;

/// Per-tick chance that a flared target becomes jammed.
pub const FLARE_JAM_PROBABILITY: f64 = 0.1;

// --- Guidance ---

/// Interceptor proximity at which the assignment is cleared (range units).
pub const INTERCEPT_HIT_RADIUS: f64 = 20.0;

// --- Population ---

/// Generic aircraft (friend/hostile/unknown/civilian) at start.
pub const DEFAULT_GENERIC_COUNT: usize = 20;

/// Inbound missiles at start.
pub const DEFAULT_MISSILE_COUNT: usize = 5;

/// Interceptors at start.
pub const DEFAULT_INTERCEPTOR_COUNT: usize = 2;

// --- Kind tables ---

/// Missile speed range (units/tick).
pub const MISSILE_SPEED: (f64, f64) = (8.0, 20.0);

/// Interceptor speed range (units/tick).
pub const INTERCEPTOR_SPEED: (f64, f64) = (20.0, 30.0);

/// Aircraft speed range (units/tick).
pub const AIRCRAFT_SPEED: (f64, f64) = (1.0, 5.0);

/// Spawn altitude for missiles and interceptors (feet).
pub const MISSILE_SPAWN_ALTITUDE: (f64, f64) = (500.0, 6000.0);

/// Spawn altitude for aircraft (feet).
pub const AIRCRAFT_SPAWN_ALTITUDE: (f64, f64) = (10_000.0, 45_000.0);

/// Interceptor RCS (square meters), near-stealth.
pub const INTERCEPTOR_RCS: f64 = 0.05;

/// Missile RCS (square meters).
pub const MISSILE_RCS: f64 = 0.1;

/// Aircraft RCS range (square meters).
pub const AIRCRAFT_RCS: (f64, f64) = (0.5, 5.0);

/// Missile ELINT signature (MHz).
pub const MISSILE_ELINT: u32 = 50;

/// Aircraft ELINT signature range (MHz, inclusive).
pub const AIRCRAFT_ELINT: (u32, u32) = (100, 500);
