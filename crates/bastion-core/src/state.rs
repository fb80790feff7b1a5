//! Game state snapshot: the complete visible state handed to presentation each frame.

use serde::{Deserialize, Serialize};

use crate::components::{Bullet, Enemy};
use crate::enums::GamePhase;

/// The single authoritative aggregate. Replaced wholesale on every commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub game_active: bool,
    /// Monotonic within a session; only a new start clears it.
    pub game_over: bool,
    pub score: u64,
    /// Spawn order.
    pub enemies: Vec<Enemy>,
    /// Fire order.
    pub bullets: Vec<Bullet>,
    /// Session clock of the last shot (ms). `None` until the first shot.
    pub last_bullet_fired_ms: Option<f64>,
    pub debug_info: DebugInfo,
    /// Next id handed to a spawned enemy or fired bullet.
    pub next_entity_id: u64,
    /// Ticks processed in this session.
    pub frame: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            game_active: false,
            game_over: false,
            score: 0,
            enemies: Vec::new(),
            bullets: Vec::new(),
            last_bullet_fired_ms: None,
            debug_info: DebugInfo::default(),
            next_entity_id: 1,
            frame: 0,
        }
    }
}

impl GameState {
    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.game_active {
            GamePhase::Active
        } else {
            GamePhase::NotStarted
        }
    }

    /// Whether ticks and spawns should be processed.
    pub fn is_running(&self) -> bool {
        self.game_active && !self.game_over
    }

    pub fn enemy(&self, id: u64) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn bullet(&self, id: u64) -> Option<&Bullet> {
        self.bullets.iter().find(|b| b.id == id)
    }
}

/// Per-frame range summary. Observational, except `enemies_in_range` gates firing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub enemies_in_range: u32,
    /// `None` when no enemy resolved a position this frame.
    pub closest_enemy_distance: Option<f64>,
    /// Nearest resolved enemies, ascending by distance, truncated for display.
    pub enemy_positions: Vec<EnemyDistance>,
}

/// A resolved enemy position with its distance from the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyDistance {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub distance: f64,
}
