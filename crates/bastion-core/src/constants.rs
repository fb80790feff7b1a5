//! Default tuning parameters. `SimConfig::default()` is built from these.

// --- Arena ---

/// Default viewport width (px) used for spawn distance when none is supplied.
pub const DEFAULT_ARENA_WIDTH: f64 = 1280.0;

/// Default viewport height (px).
pub const DEFAULT_ARENA_HEIGHT: f64 = 720.0;

/// Spawn distance as a fraction of the larger viewport dimension.
/// 0.75 of the max dimension keeps spawns off-screen for any aspect ratio
/// when the player is centered.
pub const SPAWN_DISTANCE_MULTIPLIER: f64 = 0.75;

// --- Player ---

/// Player sprite diameter (px).
pub const PLAYER_SIZE: f64 = 56.0;

/// Turret range measured from the player's center (px).
pub const SHOOTING_RANGE: f64 = 200.0;

// --- Enemies ---

/// Enemy sprite width (px).
pub const ENEMY_SIZE: f64 = 40.0;

/// Extra radius added to the player half-size for contact checks (px).
pub const ENEMY_COLLISION_PADDING: f64 = 5.0;

/// Time between enemy spawns (ms).
pub const ENEMY_SPAWN_INTERVAL_MS: f64 = 2000.0;

/// Most spawns a single timer poll may release after a stall.
pub const MAX_SPAWN_CATCH_UP: u32 = 3;

pub const BASIC_ENEMY_SPEED: f64 = 120.0;
pub const BASIC_ENEMY_POINTS: u64 = 10;
pub const BASIC_ENEMY_WEIGHT: f64 = 0.7;

pub const FAST_ENEMY_SPEED: f64 = 200.0;
pub const FAST_ENEMY_POINTS: u64 = 20;
pub const FAST_ENEMY_WEIGHT: f64 = 0.3;

// --- Bullets ---

/// Minimum time between shots (ms).
pub const BULLET_COOLDOWN_MS: f64 = 500.0;

/// Bullets are removed this long after firing, hit or not (ms).
pub const BULLET_LIFETIME_MS: f64 = 2000.0;

/// Bullet travel speed (px/s).
pub const BULLET_SPEED: f64 = 600.0;

/// Cap on flight time so close targets are not reached sluggishly (ms).
pub const BULLET_MAX_FLIGHT_MS: f64 = 500.0;

/// Bullet sprite width (px).
pub const BULLET_SIZE: f64 = 4.0;

/// Collision radius is the combined bullet + enemy size divided by this.
/// Larger values give tighter collisions.
pub const BULLET_COLLISION_DIVISOR: f64 = 3.0;

// --- Scoring ---

/// Points per kill under flat scoring.
pub const POINTS_PER_ENEMY: u64 = 10;

// --- Debug ---

/// Nearest enemies listed in the debug panel.
pub const ENEMY_POSITION_LIMIT: usize = 3;
