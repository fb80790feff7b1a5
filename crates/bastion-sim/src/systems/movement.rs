//! Kinematic step: enemies walk straight at the player.
//!
//! position += direction_to_player * speed * dt, clamped so an enemy never
//! overshoots the player.

use glam::DVec2;

use bastion_core::components::Enemy;
use bastion_core::config::SimConfig;
use bastion_core::types::Position;

/// Advance every enemy toward `player` by `elapsed_ms` of travel.
pub fn run(enemies: &mut [Enemy], player: Position, config: &SimConfig, elapsed_ms: f64) {
    let dt = elapsed_ms.max(0.0) / 1000.0;
    let goal = DVec2::from(player);

    for enemy in enemies.iter_mut() {
        let speed = config.enemy_type(enemy.kind).map_or(0.0, |t| t.speed);
        let pos = DVec2::from(enemy.position);
        let to_goal = goal - pos;
        let remaining = to_goal.length();
        let step = speed * dt;

        enemy.position = if remaining <= step {
            player
        } else {
            (pos + to_goal / remaining * step).into()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::enums::EnemyKind;

    fn enemy(kind: EnemyKind, x: f64, y: f64) -> Enemy {
        Enemy {
            id: 1,
            kind,
            spawn_position: Position::new(x, y),
            position: Position::new(x, y),
            spawned_at_ms: 0.0,
        }
    }

    #[test]
    fn moves_at_type_speed() {
        let config = SimConfig::default();
        let mut enemies = vec![enemy(EnemyKind::Basic, 600.0, 0.0)];
        // Basic speed is 120 px/s; half a second covers 60 px.
        run(&mut enemies, Position::ORIGIN, &config, 500.0);
        assert!((enemies[0].position.x - 540.0).abs() < 1e-9);
        assert_eq!(enemies[0].position.y, 0.0);
        assert_eq!(enemies[0].spawn_position, Position::new(600.0, 0.0));
    }

    #[test]
    fn fast_outpaces_basic() {
        let config = SimConfig::default();
        let mut enemies = vec![
            enemy(EnemyKind::Basic, 0.0, 800.0),
            enemy(EnemyKind::Fast, 0.0, 800.0),
        ];
        run(&mut enemies, Position::ORIGIN, &config, 1000.0);
        assert!(enemies[1].position.length() < enemies[0].position.length());
    }

    #[test]
    fn never_overshoots_player() {
        let config = SimConfig::default();
        let mut enemies = vec![enemy(EnemyKind::Fast, 3.0, 4.0)];
        run(&mut enemies, Position::ORIGIN, &config, 10_000.0);
        assert_eq!(enemies[0].position, Position::ORIGIN);
    }

    #[test]
    fn zero_or_negative_elapsed_is_stationary() {
        let config = SimConfig::default();
        let mut enemies = vec![enemy(EnemyKind::Basic, 100.0, 100.0)];
        run(&mut enemies, Position::ORIGIN, &config, 0.0);
        run(&mut enemies, Position::ORIGIN, &config, -50.0);
        assert_eq!(enemies[0].position, Position::new(100.0, 100.0));
    }
}
