//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Enemy variant. Determines speed, visual treatment and point value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnemyKind {
    /// Standard walker.
    #[default]
    Basic,
    /// Faster, rarer, worth more.
    Fast,
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "BASIC"),
            Self::Fast => write!(f, "FAST"),
        }
    }
}

/// Session phase (top-level state), derived from `GameState` flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Active,
    GameOver,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// An enemy reached the player.
    Collision,
    /// The player (or UI) ended the game explicitly.
    Player,
}
