//! Fundamental geometric types and range primitives.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in screen-space pixels.
/// Relative coordinates put the player at the origin; x grows right, y grows down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the origin (the player, for relative positions).
    pub fn length(&self) -> f64 {
        distance_from_origin(self.x, self.y)
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.distance_sq_to(other).sqrt()
    }

    /// Squared distance, for threshold comparisons without a root.
    pub fn distance_sq_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// This position expressed relative to `origin`.
    pub fn relative_to(&self, origin: &Position) -> Position {
        Position::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Position> for DVec2 {
    fn from(p: Position) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Position::new(v.x, v.y)
    }
}

/// `sqrt(x² + y²)`.
pub fn distance_from_origin(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt()
}

/// Whether `(x, y)` lies within `range` of the origin (inclusive).
pub fn is_in_range(x: f64, y: f64, range: f64) -> bool {
    distance_from_origin(x, y) <= range
}
