//! Turret targeting and bullet creation.

use bastion_core::components::{Bullet, Enemy};
use bastion_core::types::{is_in_range, Position};

use crate::frame::FrameContext;

/// The enemy the turret should fire at, with its resolved position.
#[derive(Debug, Clone, Copy)]
pub struct TargetSolution<'a> {
    pub enemy: &'a Enemy,
    pub position: Position,
    pub distance: f64,
}

/// Closest resolved enemy within `range` of the player.
///
/// Only a strictly closer enemy replaces the current pick, so ties go to the
/// earliest enemy in list order.
pub fn find_closest_enemy_in_range<'a>(
    enemies: &'a [Enemy],
    range: f64,
    ctx: &FrameContext<'_>,
) -> Option<TargetSolution<'a>> {
    let mut best: Option<TargetSolution<'a>> = None;

    for enemy in enemies {
        let Some(position) = ctx.resolve(enemy) else {
            continue;
        };
        if !is_in_range(position.x, position.y, range) {
            continue;
        }
        let distance = position.length();
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(TargetSolution {
                enemy,
                position,
                distance,
            });
        }
    }

    best
}

/// A bullet aimed at `target`, the enemy's position at the instant of firing.
/// The target is frozen; later movement or removal of `enemy` does not affect it.
pub fn create_bullet(id: u64, enemy: &Enemy, target: Position, now_ms: f64) -> Bullet {
    Bullet {
        id,
        target_x: target.x,
        target_y: target.y,
        created_at_ms: now_ms,
        target_enemy: enemy.id,
    }
}
