//! RGB colors and the camouflage distance model.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Diagonal of the RGB cube: the largest possible distance between two colors.
pub const MAX_COLOR_DISTANCE: f64 = 441.672_955_930_063_7; // 255 * sqrt(3)

/// An 8-bit-per-channel RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uniformly random color
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(rng.gen(), rng.gen(), rng.gen())
    }

    /// Euclidean distance in RGB space
    pub fn distance(&self, other: &Color) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Camouflage mismatch normalized to [0, 1]
    pub fn mismatch(&self, background: &Color) -> f64 {
        (self.distance(background) / MAX_COLOR_DISTANCE).min(1.0)
    }

    /// Apply per-channel deltas, clamping each channel to [0, 255].
    pub fn shifted(&self, dr: i32, dg: i32, db: i32) -> Self {
        Self::new(
            clamp_channel((self.r as i32).saturating_add(dr)),
            clamp_channel((self.g as i32).saturating_add(dg)),
            clamp_channel((self.b as i32).saturating_add(db)),
        )
    }

    /// Independent random walk of every channel within `[-intensity, intensity]`.
    pub fn drift(&mut self, intensity: i32, rng: &mut impl Rng) {
        if intensity <= 0 {
            return;
        }
        let dr = rng.gen_range(-intensity..=intensity);
        let dg = rng.gen_range(-intensity..=intensity);
        let db = rng.gen_range(-intensity..=intensity);
        *self = self.shifted(dr, dg, db);
    }

    pub fn as_tuple(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[inline]
fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_shift_saturates_on_huge_deltas() {
        let c = Color::new(200, 10, 128);
        assert_eq!(c.shifted(i32::MAX, i32::MIN, 0), Color::new(255, 0, 128));

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut drifting = Color::WHITE;
        for _ in 0..100 {
            drifting.drift(i32::MAX, &mut rng);
        }
    }

    #[test]
    fn test_distance_zero_for_same_color() {
        let c = Color::new(34, 139, 34);
        assert_eq!(c.distance(&c), 0.0);
        assert_eq!(c.mismatch(&c), 0.0);
    }

    #[test]
    fn test_max_distance_is_cube_diagonal() {
        let d = Color::BLACK.distance(&Color::WHITE);
        assert!((d - MAX_COLOR_DISTANCE).abs() < 1e-9);
        assert!((Color::BLACK.mismatch(&Color::WHITE) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Color::new(10, 200, 30);
        let b = Color::new(250, 0, 99);
        assert_eq!(a.distance(&b), b.distance(&a));
    }

    #[test]
    fn test_shift_clamps() {
        let c = Color::new(250, 5, 128);
        assert_eq!(c.shifted(20, -20, 0), Color::new(255, 0, 128));
    }

    #[test]
    fn test_drift_zero_intensity_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut c = Color::new(1, 2, 3);
        c.drift(0, &mut rng);
        assert_eq!(c, Color::new(1, 2, 3));
    }

    #[test]
    fn test_drift_stays_within_intensity() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let mut c = Color::new(128, 128, 128);
            c.drift(4, &mut rng);
            assert!((124..=132).contains(&c.r));
            assert!((124..=132).contains(&c.g));
            assert!((124..=132).contains(&c.b));
        }
    }
}
