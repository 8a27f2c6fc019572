//! Simulation constants and tuning parameters.

/// Host frame rate used by the headless runner (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per frame at the default tick rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Vector math ---

/// Squared length below which a vector is treated as zero when normalizing.
pub const NORMALIZE_EPSILON_SQ: f32 = 1e-12;

/// Squared distance below which an aim direction is considered degenerate.
pub const DEGENERATE_DIRECTION_SQ: f32 = 1e-6;

// --- Waves ---

/// Row index of the off-board standby row.
pub const STANDBY_ROW: i32 = -1;

/// Lower bound on the row-advance interval (seconds).
pub const MIN_ROW_ADVANCE_INTERVAL: f32 = 0.1;

/// Most row advances resolved in one tick. A longer backlog resyncs the timer.
pub const MAX_ROW_ADVANCES_PER_TICK: u32 = 64;

/// Column fill ratio used when the configured ratio is unset (<= 0).
pub const DEFAULT_WAVE_FILL_RATIO: f32 = 0.4;

// --- Projectiles ---

/// Lower bound on any projectile speed (units/s).
pub const MIN_PROJECTILE_SPEED: f32 = 0.1;

// --- Entities ---

/// Tolerance band for the enemy preferred-range check (world units).
pub const PREFERRED_RANGE_TOLERANCE: f32 = 0.25;

/// Smallest attack cooldown an ability modifier can produce (seconds).
pub const MIN_ATTACK_COOLDOWN: f32 = 0.05;

/// Smallest factor a Multiply modifier applies.
pub const MIN_MODIFIER_MULTIPLIER: f32 = 0.01;

/// Minimum enemy max health.
pub const MIN_ENEMY_MAX_HEALTH: f32 = 0.1;

/// Minimum player and fortress max health.
pub const MIN_MAX_HEALTH: f32 = 1.0;

/// Default experience needed for level 2.
pub const DEFAULT_EXPERIENCE_TO_LEVEL: f32 = 100.0;

/// Default multiplier applied to the level threshold after each level-up.
pub const DEFAULT_EXPERIENCE_GROWTH: f32 = 1.25;

// --- Session ---

/// Delay before the first free ability choice is offered (seconds).
pub const INITIAL_ABILITY_OFFER_DELAY_SECS: f32 = 1.0;

/// Ability choices offered when the configured count is zero.
pub const DEFAULT_ABILITY_CHOICES: usize = 3;

/// Minimum radius around a locked bombardment point that releases the lock.
pub const MIN_BOMBARDMENT_RELEASE_RADIUS: f32 = 0.25;
