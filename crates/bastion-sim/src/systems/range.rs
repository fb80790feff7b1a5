//! Range classification and player contact detection.

use tracing::trace;

use bastion_core::components::Enemy;
use bastion_core::config::SimConfig;
use bastion_core::state::{DebugInfo, EnemyDistance};
use bastion_core::types::is_in_range;

use crate::frame::FrameContext;

/// An enemy touching the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerHit {
    pub enemy_id: u64,
    pub distance: f64,
}

/// Count enemies in range, find the closest distance, and list the nearest few.
///
/// Enemies that do not resolve this frame are left out entirely. The sort is
/// stable, so equal distances keep spawn order.
pub fn track_enemies_in_range(
    enemies: &[Enemy],
    range: f64,
    ctx: &FrameContext<'_>,
    limit: usize,
) -> DebugInfo {
    let mut in_range = 0u32;
    let mut closest: Option<f64> = None;
    let mut positions: Vec<EnemyDistance> = Vec::with_capacity(enemies.len());

    for enemy in enemies {
        let Some(pos) = ctx.resolve(enemy) else {
            continue;
        };
        let distance = pos.length();

        if is_in_range(pos.x, pos.y, range) {
            in_range += 1;
        }
        if closest.map_or(true, |c| distance < c) {
            closest = Some(distance);
        }
        positions.push(EnemyDistance {
            id: enemy.id,
            x: pos.x,
            y: pos.y,
            distance,
        });
    }

    trace!(
        resolved = positions.len(),
        in_range,
        closest = ?closest,
        "range scan"
    );

    positions.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    positions.truncate(limit);

    DebugInfo {
        enemies_in_range: in_range,
        closest_enemy_distance: closest,
        enemy_positions: positions,
    }
}

/// First enemy (in list order) closer to the player than half the player size
/// plus the enemy padding. Compares squared distances.
pub fn check_player_collisions(
    enemies: &[Enemy],
    ctx: &FrameContext<'_>,
    config: &SimConfig,
) -> Option<PlayerHit> {
    let threshold = config.player_collision_threshold();
    let threshold_sq = threshold * threshold;

    enemies.iter().find_map(|enemy| {
        let pos = ctx.resolve(enemy)?;
        let distance_sq = pos.x * pos.x + pos.y * pos.y;
        (distance_sq < threshold_sq).then(|| PlayerHit {
            enemy_id: enemy.id,
            distance: distance_sq.sqrt(),
        })
    })
}
