//! Probabilistic perturbation of freshly produced genomes.

use crate::genetics::Genome;
use rand::Rng;

/// Applies bounded random deltas to an offspring genome.
///
/// Color deltas spread twice as wide as positional ones.
#[derive(Debug, Clone)]
pub struct Mutator {
    /// Probability that a genome mutates at all
    pub rate: f64,
    /// Half-width of the positional delta range
    pub intensity: i32,
    /// Positional domain is `[0, width] x [0, height]`
    pub width: i32,
    pub height: i32,
}

impl Mutator {
    pub fn new(rate: f64, intensity: i32, width: i32, height: i32) -> Self {
        Self {
            rate,
            intensity: intensity.max(0),
            width,
            height,
        }
    }

    /// Maybe mutate `genome` in place. Returns whether mutation fired.
    pub fn mutate(&self, genome: &mut Genome, rng: &mut impl Rng) -> bool {
        if rng.gen::<f64>() >= self.rate {
            return false;
        }

        let pos = self.intensity;
        let col = self.intensity.saturating_mul(2);

        let dx = rng.gen_range(-pos..=pos);
        let dy = rng.gen_range(-pos..=pos);
        let dr = rng.gen_range(-col..=col);
        let dg = rng.gen_range(-col..=col);
        let db = rng.gen_range(-col..=col);

        genome.x = genome.x.saturating_add(dx);
        genome.y = genome.y.saturating_add(dy);
        genome.clamp_position(self.width, self.height);
        genome.color = genome.color.shifted(dr, dg, db);

        true
    }
}
