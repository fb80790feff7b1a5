//! Entity records stored in the game state.
//!
//! Plain data with no behavior beyond trivial accessors.
//! Game logic lives in the sim crate's systems.

use serde::{Deserialize, Serialize};

use crate::enums::EnemyKind;
use crate::types::Position;

/// An enemy converging on the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u64,
    pub kind: EnemyKind,
    /// Absolute spawn point (presentation animates from here).
    pub spawn_position: Position,
    /// Last known absolute world position, advanced by the movement step.
    /// Gameplay reads positions through the frame context, not this field.
    pub position: Position,
    /// Session clock at spawn (ms).
    pub spawned_at_ms: f64,
}

/// A turret projectile flying toward a fixed point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u64,
    /// Target coordinates (relative to the player), frozen at fire time.
    pub target_x: f64,
    pub target_y: f64,
    /// Session clock at fire time (ms).
    pub created_at_ms: f64,
    /// Enemy that was targeted. Informational only; bullets never retarget.
    pub target_enemy: u64,
}

impl Bullet {
    pub fn target(&self) -> Position {
        Position::new(self.target_x, self.target_y)
    }

    /// Age in ms at `now_ms`.
    pub fn age_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.created_at_ms
    }
}
