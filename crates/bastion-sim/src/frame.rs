//! Per-tick frame context and position resolution.
//!
//! The player's absolute position is resolved once when the context is built;
//! every enemy query then recomputes the enemy's offset from it. Nothing is
//! cached across ticks.

use bastion_core::components::Enemy;
use bastion_core::types::Position;

/// Source of absolute positions for the current frame.
///
/// The default `WorldPositions` reads the simulation's own coordinates. A
/// presentation surface can supply its own resolver and answer `None` for
/// anything it has not placed yet.
pub trait PositionResolver {
    /// Absolute player position. `None` falls back to the world origin.
    fn player_position(&self) -> Option<Position> {
        Some(Position::ORIGIN)
    }

    /// Absolute enemy position, or `None` if it cannot be resolved this frame.
    fn enemy_position(&self, enemy: &Enemy) -> Option<Position>;
}

/// Authoritative world coordinates: player at the origin, enemies where the
/// movement step left them.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldPositions;

impl PositionResolver for WorldPositions {
    fn enemy_position(&self, enemy: &Enemy) -> Option<Position> {
        enemy.position.is_finite().then_some(enemy.position)
    }
}

/// Geometry for one tick, threaded through every range and collision query.
pub struct FrameContext<'a> {
    player: Position,
    resolver: &'a dyn PositionResolver,
}

impl<'a> FrameContext<'a> {
    pub fn new(resolver: &'a dyn PositionResolver) -> Self {
        let player = resolver
            .player_position()
            .filter(Position::is_finite)
            .unwrap_or(Position::ORIGIN);
        Self { player, resolver }
    }

    /// The player's absolute position for this tick.
    pub fn player(&self) -> Position {
        self.player
    }

    /// Enemy position relative to the player, recomputed on every call.
    pub fn resolve(&self, enemy: &Enemy) -> Option<Position> {
        self.resolver
            .enemy_position(enemy)
            .filter(Position::is_finite)
            .map(|abs| abs.relative_to(&self.player))
    }
}
