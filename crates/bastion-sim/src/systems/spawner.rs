//! Enemy spawning: off-screen placement, weighted type selection and the
//! fixed-interval spawn timer.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::Enemy;
use bastion_core::config::{ArenaConfig, EnemyTypeConfig, SimConfig};
use bastion_core::constants::MAX_SPAWN_CATCH_UP;
use bastion_core::enums::EnemyKind;
use bastion_core::types::Position;

/// Random point on the spawn ring around `center`.
///
/// The ring radius scales with the larger viewport dimension, so spawns stay
/// off-screen whatever the aspect ratio.
pub fn generate_random_position(
    rng: &mut ChaCha8Rng,
    arena: &ArenaConfig,
    center: Position,
) -> Position {
    let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let distance = arena.spawn_distance();
    Position::new(
        center.x + angle.cos() * distance,
        center.y + angle.sin() * distance,
    )
}

/// Weighted pick from the registry by linear scan.
///
/// Falls back to the default kind when the registry is empty or float error
/// leaves the draw unmatched.
pub fn get_random_enemy_type(rng: &mut ChaCha8Rng, types: &[EnemyTypeConfig]) -> EnemyKind {
    let total: f64 = types.iter().map(|t| t.spawn_weight).sum();
    if total.is_nan() || total <= 0.0 {
        return EnemyKind::default();
    }

    let mut r = rng.gen::<f64>() * total;
    for entry in types {
        r -= entry.spawn_weight;
        if r <= 0.0 {
            return entry.kind;
        }
    }
    EnemyKind::default()
}

/// A freshly spawned enemy of a random kind, somewhere on the spawn ring.
pub fn create_enemy(
    id: u64,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
    center: Position,
    now_ms: f64,
) -> Enemy {
    let kind = get_random_enemy_type(rng, &config.enemy.types);
    let position = generate_random_position(rng, &config.arena, center);
    Enemy {
        id,
        kind,
        spawn_position: position,
        position,
        spawned_at_ms: now_ms,
    }
}

/// Fixed-interval spawn schedule, independent of the frame rate.
///
/// Disarmed timers never fire, so a finished session cannot receive spawns.
#[derive(Debug, Clone, Default)]
pub struct SpawnTimer {
    interval_ms: f64,
    next_due_ms: Option<f64>,
}

impl SpawnTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_due_ms: None,
        }
    }

    /// Start the schedule: the first spawn is due one interval after `now_ms`.
    pub fn arm(&mut self, now_ms: f64) {
        self.next_due_ms = Some(now_ms + self.interval_ms);
    }

    pub fn disarm(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn next_due_ms(&self) -> Option<f64> {
        self.next_due_ms
    }

    /// Number of spawns due at `now_ms`, advancing the schedule past them.
    ///
    /// After a long stall at most `MAX_SPAWN_CATCH_UP` spawns are released and
    /// the rest of the backlog is dropped.
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        let Some(mut due) = self.next_due_ms else {
            return 0;
        };

        let mut count = 0;
        while now_ms >= due && count < MAX_SPAWN_CATCH_UP {
            count += 1;
            due += self.interval_ms;
        }
        if now_ms >= due {
            due = now_ms + self.interval_ms;
        }

        self.next_due_ms = Some(due);
        count
    }
}
