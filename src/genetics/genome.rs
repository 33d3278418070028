//! Heritable state of an individual.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Position and coloration, inherited from the parents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

impl Genome {
    pub fn new(x: i32, y: i32, color: Color) -> Self {
        Self { x, y, color }
    }

    /// Squared Euclidean distance between the two positions
    #[inline]
    pub fn distance_sq(&self, other: &Genome) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Clamp position into `[0, width] x [0, height]`
    pub fn clamp_position(&mut self, width: i32, height: i32) {
        self.x = self.x.clamp(0, width);
        self.y = self.y.clamp(0, height);
    }
}

impl std::fmt::Display for Genome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pos({}, {}) {}", self.x, self.y, self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_sq() {
        let a = Genome::new(0, 0, Color::BLACK);
        let b = Genome::new(3, 4, Color::WHITE);
        assert_eq!(a.distance_sq(&b), 25);
        assert_eq!(b.distance_sq(&a), 25);
    }

    #[test]
    fn test_clamp_position_allows_far_edge() {
        let mut g = Genome::new(-5, 120, Color::BLACK);
        g.clamp_position(100, 100);
        assert_eq!((g.x, g.y), (0, 100));
    }
}
