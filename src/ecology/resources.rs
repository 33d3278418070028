//! Drifting resource sources that replenish nearby individuals.

use crate::ecology::biome::Bounds;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration for the resource sources placed in every biome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Sources created in each biome at setup
    pub sources_per_biome: usize,
    /// Feeding radius around a source
    pub radius: f64,
    /// Maximum per-axis displacement per step
    pub drift_intensity: i32,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            sources_per_biome: 1,
            radius: 80.0,
            drift_intensity: 5,
        }
    }
}

/// A point that feeds every individual within its radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSource {
    pub x: i32,
    pub y: i32,
    pub radius: f64,
    pub energy_yield: i32,
}

impl ResourceSource {
    pub fn new(x: i32, y: i32, radius: f64, energy_yield: i32) -> Self {
        Self {
            x,
            y,
            radius,
            energy_yield,
        }
    }

    /// Place a source uniformly at random inside `bounds`
    pub fn random_in(bounds: &Bounds, radius: f64, energy_yield: i32, rng: &mut impl Rng) -> Self {
        let (x, y) = bounds.random_point(rng);
        Self::new(x, y, radius, energy_yield)
    }

    /// Bounded random walk, clamped to the owning biome
    pub fn drift(&mut self, bounds: &Bounds, intensity: i32, rng: &mut impl Rng) {
        let intensity = intensity.max(0);
        let dx = rng.gen_range(-intensity..=intensity);
        let dy = rng.gen_range(-intensity..=intensity);
        (self.x, self.y) = bounds.clamp(self.x.saturating_add(dx), self.y.saturating_add(dy));
    }

    /// Whether the point lies within the feeding radius
    #[inline]
    pub fn reaches(&self, x: i32, y: i32) -> bool {
        let dx = (x - self.x) as f64;
        let dy = (y - self.y) as f64;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_drift_saturates_on_huge_intensity() {
        let bounds = Bounds::new(0, 49, 0, 49);
        let mut source = ResourceSource::new(49, 0, 5.0, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..200 {
            source.drift(&bounds, i32::MAX, &mut rng);
            assert!(bounds.contains(source.x, source.y));
        }
    }

    #[test]
    fn test_reaches_boundary_inclusive() {
        let source = ResourceSource::new(50, 50, 5.0, 10);
        assert!(source.reaches(50, 50));
        assert!(source.reaches(55, 50));
        assert!(source.reaches(53, 54));
        assert!(!source.reaches(56, 50));
    }

    #[test]
    fn test_drift_stays_in_bounds() {
        let bounds = Bounds::new(10, 20, 30, 35);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut source = ResourceSource::new(10, 30, 4.0, 1);

        for _ in 0..1000 {
            source.drift(&bounds, 7, &mut rng);
            assert!(bounds.contains(source.x, source.y));
        }
    }

    #[test]
    fn test_drift_zero_intensity_stays_put() {
        let bounds = Bounds::new(0, 100, 0, 100);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut source = ResourceSource::new(42, 17, 4.0, 1);
        source.drift(&bounds, 0, &mut rng);
        assert_eq!((source.x, source.y), (42, 17));
    }

    #[test]
    fn test_random_placement_inside_bounds() {
        let bounds = Bounds::new(500, 510, 0, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let s = ResourceSource::random_in(&bounds, 1.0, 5, &mut rng);
            assert!(bounds.contains(s.x, s.y));
            assert_eq!(s.energy_yield, 5);
        }
    }
}
