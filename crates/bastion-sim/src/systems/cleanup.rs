//! Cleanup system: removes bullets that have outlived their lifetime.

use bastion_core::components::Bullet;

/// Drop every bullet aged `lifetime_ms` or more, hit or not. Order is preserved.
pub fn prune_expired_bullets(bullets: &mut Vec<Bullet>, now_ms: f64, lifetime_ms: f64) {
    bullets.retain(|b| b.age_ms(now_ms) < lifetime_ms);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullet(id: u64, created_at_ms: f64) -> Bullet {
        Bullet {
            id,
            target_x: 50.0,
            target_y: 0.0,
            created_at_ms,
            target_enemy: 1,
        }
    }

    #[test]
    fn lifetime_boundary() {
        let mut bullets = vec![bullet(1, 0.0)];
        prune_expired_bullets(&mut bullets, 1999.0, 2000.0);
        assert_eq!(bullets.len(), 1, "bullet aged 1999ms survives");

        prune_expired_bullets(&mut bullets, 2000.0, 2000.0);
        assert!(bullets.is_empty(), "bullet aged exactly the lifetime is pruned");
    }

    #[test]
    fn keeps_order_of_survivors() {
        let mut bullets = vec![bullet(1, 0.0), bullet(2, 500.0), bullet(3, 1500.0)];
        prune_expired_bullets(&mut bullets, 2300.0, 2000.0);
        let ids: Vec<u64> = bullets.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
