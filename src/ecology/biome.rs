//! Biomes and the rectangular regions they occupy.

use crate::color::Color;
use crate::ecology::resources::ResourceSource;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Stable biome identifier: the biome's index in the environment's ordered list.
pub type BiomeId = usize;

/// Inclusive axis-aligned rectangle in world cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_start: i32,
    pub x_end: i32,
    pub y_start: i32,
    pub y_end: i32,
}

impl Bounds {
    pub fn new(x_start: i32, x_end: i32, y_start: i32, y_end: i32) -> Self {
        Self {
            x_start,
            x_end,
            y_start,
            y_end,
        }
    }

    /// Rectangle covering `width` x `height` cells from the origin
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, width - 1, 0, height - 1)
    }

    pub fn width(&self) -> i32 {
        self.x_end - self.x_start + 1
    }

    pub fn height(&self) -> i32 {
        self.y_end - self.y_start + 1
    }

    /// Number of cells covered
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        self.width() as i64 * self.height() as i64
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Point-in-rectangle test, edges included
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.x_start <= x && x <= self.x_end && self.y_start <= y && y <= self.y_end
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x_start <= other.x_end
            && other.x_start <= self.x_end
            && self.y_start <= other.y_end
            && other.y_start <= self.y_end
    }

    /// Clamp a point component-wise into the rectangle
    pub fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x.clamp(self.x_start, self.x_end),
            y.clamp(self.y_start, self.y_end),
        )
    }

    /// Uniformly random cell inside the rectangle
    pub fn random_point(&self, rng: &mut impl Rng) -> (i32, i32) {
        (
            rng.gen_range(self.x_start..=self.x_end),
            rng.gen_range(self.y_start..=self.y_end),
        )
    }

    /// Split off the leading `columns` columns. Returns (slice, remainder).
    pub fn split_columns(&self, columns: i32) -> (Bounds, Bounds) {
        let cut = self.x_start + columns;
        (
            Bounds::new(self.x_start, cut - 1, self.y_start, self.y_end),
            Bounds::new(cut, self.x_end, self.y_start, self.y_end),
        )
    }

    /// Split off the leading `rows` rows. Returns (slice, remainder).
    pub fn split_rows(&self, rows: i32) -> (Bounds, Bounds) {
        let cut = self.y_start + rows;
        (
            Bounds::new(self.x_start, self.x_end, self.y_start, cut - 1),
            Bounds::new(self.x_start, self.x_end, cut, self.y_end),
        )
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x[{}..={}] y[{}..={}]",
            self.x_start, self.x_end, self.y_start, self.y_end
        )
    }
}

/// Biome description as it appears in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeSpec {
    pub name: String,
    /// Target share of the total area
    pub proportion: f64,
    pub color: Color,
    /// Energy granted by each of the biome's resource sources
    pub energy_yield: i32,
}

impl BiomeSpec {
    pub fn new(name: &str, proportion: f64, color: Color, energy_yield: i32) -> Self {
        Self {
            name: name.to_string(),
            proportion,
            color,
            energy_yield,
        }
    }

    /// Proportion clamped to [0, 1]; NaN counts as zero
    pub fn clamped_proportion(&self) -> f64 {
        if self.proportion.is_nan() {
            0.0
        } else {
            self.proportion.clamp(0.0, 1.0)
        }
    }
}

/// A laid-out region of the environment
#[derive(Debug, Clone)]
pub struct Biome {
    pub name: String,
    pub proportion: f64,
    /// Current background color; drifts during a run
    pub color: Color,
    pub bounds: Bounds,
    /// Maximum sustainable resident count
    pub capacity: usize,
    pub energy_yield: i32,
    pub sources: Vec<ResourceSource>,
}

impl Biome {
    pub fn new(spec: &BiomeSpec, bounds: Bounds, capacity: usize) -> Self {
        Self {
            name: spec.name.clone(),
            proportion: spec.clamped_proportion(),
            color: spec.color,
            bounds,
            capacity,
            energy_yield: spec.energy_yield,
            sources: Vec::new(),
        }
    }

    /// Energy from the first source in reach of the point, if any
    pub fn forage(&self, x: i32, y: i32) -> Option<i32> {
        self.sources
            .iter()
            .find(|s| s.reaches(x, y))
            .map(|s| s.energy_yield)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_dimensions() {
        let b = Bounds::new(0, 49, 0, 49);
        assert_eq!(b.width(), 50);
        assert_eq!(b.height(), 50);
        assert_eq!(b.area(), 2500);
    }

    #[test]
    fn test_bounds_contains_edges() {
        let b = Bounds::new(10, 20, 5, 6);
        assert!(b.contains(10, 5));
        assert!(b.contains(20, 6));
        assert!(!b.contains(21, 6));
        assert!(!b.contains(10, 4));
    }

    #[test]
    fn test_split_columns_tiles() {
        let b = Bounds::from_size(100, 50);
        let (left, right) = b.split_columns(30);
        assert_eq!(left, Bounds::new(0, 29, 0, 49));
        assert_eq!(right, Bounds::new(30, 99, 0, 49));
        assert!(!left.overlaps(&right));
        assert_eq!(left.area() + right.area(), b.area());
    }

    #[test]
    fn test_split_rows_tiles() {
        let b = Bounds::new(30, 99, 0, 49);
        let (top, bottom) = b.split_rows(10);
        assert_eq!(top, Bounds::new(30, 99, 0, 9));
        assert_eq!(bottom, Bounds::new(30, 99, 10, 49));
    }

    #[test]
    fn test_forage_takes_first_source_in_reach() {
        let spec = BiomeSpec::new("marsh", 1.0, Color::BLACK, 10);
        let mut biome = Biome::new(&spec, Bounds::new(0, 99, 0, 99), 10);
        biome.sources = vec![
            ResourceSource::new(80, 80, 5.0, 99),
            ResourceSource::new(10, 10, 20.0, 40),
            ResourceSource::new(12, 12, 20.0, 25),
        ];

        assert_eq!(biome.forage(11, 11), Some(40));
        assert_eq!(biome.forage(50, 50), None);
    }

    #[test]
    fn test_proportion_clamped() {
        let spec = BiomeSpec::new("x", 1.7, Color::BLACK, 1);
        assert_eq!(spec.clamped_proportion(), 1.0);
        let spec = BiomeSpec::new("y", -0.2, Color::BLACK, 1);
        assert_eq!(spec.clamped_proportion(), 0.0);
        let spec = BiomeSpec::new("z", f64::NAN, Color::BLACK, 1);
        assert_eq!(spec.clamped_proportion(), 0.0);
    }
}
