//! Session configuration. Fixed for the lifetime of a session and validated
//! before the session starts, so the hot loop never meets a bad value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::EnemyKind;

/// Everything a session needs. Every field has a default, so partial JSON works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and frame sequence = same session.
    pub seed: u64,
    pub arena: ArenaConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub bullet: BulletConfig,
    pub scoring: ScoringMode,
    pub debug: DebugConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena: ArenaConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            bullet: BulletConfig::default(),
            scoring: ScoringMode::default(),
            debug: DebugConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    pub spawn_distance_multiplier: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_ARENA_WIDTH,
            height: DEFAULT_ARENA_HEIGHT,
            spawn_distance_multiplier: SPAWN_DISTANCE_MULTIPLIER,
        }
    }
}

impl ArenaConfig {
    /// Radius of the spawn ring around the player.
    pub fn spawn_distance(&self) -> f64 {
        self.width.max(self.height) * self.spawn_distance_multiplier
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub size: f64,
    pub shooting_range: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: PLAYER_SIZE,
            shooting_range: SHOOTING_RANGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub size: f64,
    pub collision_padding: f64,
    pub spawn_interval_ms: f64,
    /// Type registry sampled by spawn weight.
    pub types: Vec<EnemyTypeConfig>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            size: ENEMY_SIZE,
            collision_padding: ENEMY_COLLISION_PADDING,
            spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,
            types: vec![
                EnemyTypeConfig {
                    kind: EnemyKind::Basic,
                    speed: BASIC_ENEMY_SPEED,
                    points: BASIC_ENEMY_POINTS,
                    spawn_weight: BASIC_ENEMY_WEIGHT,
                    color: "red".into(),
                },
                EnemyTypeConfig {
                    kind: EnemyKind::Fast,
                    speed: FAST_ENEMY_SPEED,
                    points: FAST_ENEMY_POINTS,
                    spawn_weight: FAST_ENEMY_WEIGHT,
                    color: "yellow".into(),
                },
            ],
        }
    }
}

/// One entry of the enemy type registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTypeConfig {
    pub kind: EnemyKind,
    /// Movement speed toward the player (px/s).
    pub speed: f64,
    /// Points awarded under per-type scoring.
    pub points: u64,
    /// Relative spawn likelihood.
    pub spawn_weight: f64,
    /// Visual treatment hint for presentation.
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub cooldown_ms: f64,
    pub lifetime_ms: f64,
    /// Travel speed (px/s).
    pub speed: f64,
    pub max_flight_ms: f64,
    pub size: f64,
    pub collision_divisor: f64,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: BULLET_COOLDOWN_MS,
            lifetime_ms: BULLET_LIFETIME_MS,
            speed: BULLET_SPEED,
            max_flight_ms: BULLET_MAX_FLIGHT_MS,
            size: BULLET_SIZE,
            collision_divisor: BULLET_COLLISION_DIVISOR,
        }
    }
}

/// How kills are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScoringMode {
    /// Each enemy kind's registry point value.
    #[default]
    PerType,
    /// Same points for every kill.
    Flat { points: u64 },
}

impl ScoringMode {
    pub fn flat() -> Self {
        Self::Flat {
            points: POINTS_PER_ENEMY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub enemy_position_limit: usize,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enemy_position_limit: ENEMY_POSITION_LIMIT,
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyEnemyRegistry,
    DuplicateEnemyKind { kind: EnemyKind },
    InvalidSpawnWeight { kind: EnemyKind, weight: f64 },
    ZeroTotalSpawnWeight,
    NonPositive { field: &'static str, value: f64 },
    Negative { field: &'static str, value: f64 },
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEnemyRegistry => write!(f, "enemy type registry is empty"),
            Self::DuplicateEnemyKind { kind } => {
                write!(f, "enemy kind {kind} is registered more than once")
            }
            Self::InvalidSpawnWeight { kind, weight } => {
                write!(f, "spawn weight for {kind} must be finite and >= 0, got {weight}")
            }
            Self::ZeroTotalSpawnWeight => write!(f, "total enemy spawn weight must be > 0"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be finite and > 0, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must be finite and >= 0, got {value}")
            }
            Self::Parse(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl SimConfig {
    /// Parse JSON and validate.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Registry entry for a kind.
    pub fn enemy_type(&self, kind: EnemyKind) -> Option<&EnemyTypeConfig> {
        self.enemy.types.iter().find(|t| t.kind == kind)
    }

    /// Sum of all registry spawn weights.
    pub fn total_spawn_weight(&self) -> f64 {
        self.enemy.types.iter().map(|t| t.spawn_weight).sum()
    }

    /// Player contact radius: half the player plus enemy padding.
    pub fn player_collision_threshold(&self) -> f64 {
        self.player.size / 2.0 + self.enemy.collision_padding
    }

    /// Bullet/enemy contact radius.
    pub fn bullet_collision_threshold(&self) -> f64 {
        (self.bullet.size + self.enemy.size) / self.bullet.collision_divisor
    }

    /// Points awarded for destroying one enemy of `kind`.
    pub fn points_for(&self, kind: EnemyKind) -> u64 {
        match self.scoring {
            ScoringMode::PerType => self.enemy_type(kind).map_or(0, |t| t.points),
            ScoringMode::Flat { points } => points,
        }
    }

    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;
        positive(
            "arena.spawn_distance_multiplier",
            self.arena.spawn_distance_multiplier,
        )?;
        positive("player.size", self.player.size)?;
        non_negative("player.shooting_range", self.player.shooting_range)?;
        positive("enemy.size", self.enemy.size)?;
        non_negative("enemy.collision_padding", self.enemy.collision_padding)?;
        positive("enemy.spawn_interval_ms", self.enemy.spawn_interval_ms)?;
        non_negative("bullet.cooldown_ms", self.bullet.cooldown_ms)?;
        positive("bullet.lifetime_ms", self.bullet.lifetime_ms)?;
        positive("bullet.speed", self.bullet.speed)?;
        positive("bullet.max_flight_ms", self.bullet.max_flight_ms)?;
        positive("bullet.size", self.bullet.size)?;
        positive("bullet.collision_divisor", self.bullet.collision_divisor)?;

        if self.enemy.types.is_empty() {
            return Err(ConfigError::EmptyEnemyRegistry);
        }
        for (i, entry) in self.enemy.types.iter().enumerate() {
            if self.enemy.types[..i].iter().any(|t| t.kind == entry.kind) {
                return Err(ConfigError::DuplicateEnemyKind { kind: entry.kind });
            }
            if !entry.spawn_weight.is_finite() || entry.spawn_weight < 0.0 {
                return Err(ConfigError::InvalidSpawnWeight {
                    kind: entry.kind,
                    weight: entry.spawn_weight,
                });
            }
            positive("enemy.types[].speed", entry.speed)?;
        }
        if self.total_spawn_weight() <= 0.0 {
            return Err(ConfigError::ZeroTotalSpawnWeight);
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
