//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{EndReason, EnemyKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new session began.
    GameStarted,
    /// Enemy appeared off-screen.
    EnemySpawned {
        id: u64,
        kind: EnemyKind,
        x: f64,
        y: f64,
    },
    /// Turret fired at an enemy.
    BulletFired {
        bullet_id: u64,
        enemy_id: u64,
        distance: f64,
    },
    /// Enemy destroyed by one or more bullets.
    EnemyDestroyed {
        enemy_id: u64,
        kind: EnemyKind,
        points: u64,
    },
    /// Enemy reached the player.
    PlayerHit { enemy_id: u64, distance: f64 },
    /// Session ended.
    GameEnded { score: u64, reason: EndReason },
}
