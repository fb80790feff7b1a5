//! Bullet flight and bullet/enemy collision detection.

use glam::DVec2;

use bastion_core::components::{Bullet, Enemy};
use bastion_core::config::{BulletConfig, SimConfig};
use bastion_core::types::Position;

use crate::frame::FrameContext;

/// Time for a bullet to reach its target (ms), capped at `max_flight_ms`.
pub fn flight_time_ms(bullet: &Bullet, config: &BulletConfig) -> f64 {
    let distance = bullet.target().length();
    (distance / config.speed * 1000.0).min(config.max_flight_ms)
}

/// Bullet position relative to the player at `now_ms`.
///
/// Bullets leave the player in a straight line and rest on their target
/// after arrival until their lifetime runs out.
pub fn bullet_position(bullet: &Bullet, now_ms: f64, config: &BulletConfig) -> Position {
    let flight_ms = flight_time_ms(bullet, config);
    if flight_ms <= 0.0 {
        return bullet.target();
    }
    let t = (bullet.age_ms(now_ms) / flight_ms).clamp(0.0, 1.0);
    DVec2::ZERO.lerp(DVec2::from(bullet.target()), t).into()
}

/// The stretch of time one collision pass covers.
#[derive(Debug, Clone, Copy)]
pub struct Sweep<'a> {
    /// Enemies as they stood before this frame's movement.
    pub previous: &'a [Enemy],
    pub elapsed_ms: f64,
    pub now_ms: f64,
}

impl<'a> Sweep<'a> {
    /// A zero-length sweep: a single sample at `now_ms`.
    pub fn at(now_ms: f64) -> Self {
        Self {
            previous: &[],
            elapsed_ms: 0.0,
            now_ms,
        }
    }

    pub fn start_ms(&self) -> f64 {
        self.now_ms - self.elapsed_ms.max(0.0)
    }

    /// Where `enemy` stood at the start of the sweep, by id. Enemies with no
    /// earlier record are treated as stationary.
    fn previous_of(&self, index: usize, enemy: &Enemy) -> Option<&'a Enemy> {
        self.previous
            .get(index)
            .filter(|p| p.id == enemy.id)
            .or_else(|| self.previous.iter().find(|p| p.id == enemy.id))
    }
}

/// Smallest squared length of `d0 + (d1 - d0) * t` for `t` in `[0, 1]`.
fn closest_approach_sq(d0: DVec2, d1: DVec2) -> f64 {
    let v = d1 - d0;
    let vv = v.length_squared();
    let t = if vv > 0.0 {
        (-d0.dot(v) / vv).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (d0 + v * t).length_squared()
}

/// `(bullet_id, enemy_id)` pairs that touched during this frame.
///
/// Bullet and enemy are swept together over the frame: contact counts if
/// their relative path comes within `(bullet.size + enemy.size) /
/// collision_divisor` at any point, so long frames cannot step a bullet
/// through an enemy. Each bullet is credited with at most one enemy, the
/// first in list order. Unresolved enemies are skipped. Nothing is mutated.
pub fn check_bullet_collisions(
    bullets: &[Bullet],
    enemies: &[Enemy],
    ctx: &FrameContext<'_>,
    sweep: &Sweep<'_>,
    config: &SimConfig,
) -> Vec<(u64, u64)> {
    if bullets.is_empty() || enemies.is_empty() {
        return Vec::new();
    }

    let threshold = config.bullet_collision_threshold();
    let threshold_sq = threshold * threshold;

    // Resolve each enemy once rather than once per bullet.
    let resolved: Vec<(u64, DVec2, DVec2)> = enemies
        .iter()
        .enumerate()
        .filter_map(|(index, enemy)| {
            let now = ctx.resolve(enemy)?;
            let before = sweep
                .previous_of(index, enemy)
                .and_then(|p| ctx.resolve(p))
                .unwrap_or(now);
            Some((enemy.id, DVec2::from(before), DVec2::from(now)))
        })
        .collect();
    if resolved.is_empty() {
        return Vec::new();
    }

    let start_ms = sweep.start_ms();
    bullets
        .iter()
        .filter_map(|bullet| {
            let from = DVec2::from(bullet_position(bullet, start_ms, &config.bullet));
            let to = DVec2::from(bullet_position(bullet, sweep.now_ms, &config.bullet));
            resolved
                .iter()
                .find(|&&(_, before, now)| {
                    closest_approach_sq(from - before, to - now) <= threshold_sq
                })
                .map(|&(enemy_id, _, _)| (bullet.id, enemy_id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_approach_catches_crossing() {
        // Relative offset flips sign between samples: they passed through each other.
        let d = closest_approach_sq(DVec2::new(0.0, -49.0), DVec2::new(0.0, 36.0));
        assert_eq!(d, 0.0);
    }

    #[test]
    fn closest_approach_clamps_to_segment() {
        let d = closest_approach_sq(DVec2::new(0.0, -100.0), DVec2::new(0.0, -15.0));
        assert!((d - 225.0).abs() < 1e-9);
        assert_eq!(closest_approach_sq(DVec2::new(3.0, 4.0), DVec2::new(3.0, 4.0)), 25.0);
    }
}
