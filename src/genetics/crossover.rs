//! Genome crossover for sexual reproduction.

use crate::color::Color;
use crate::genetics::Genome;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Crossover system combining two parent genomes field by field
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CrossoverSystem {
    /// Total crossovers performed
    pub total_crossovers: u64,
    /// Fields inherited from the first parent
    pub fields_from_first: u64,
    /// Fields inherited from the second parent
    pub fields_from_second: u64,
}

impl CrossoverSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a child genome. Each of x, y, r, g, b is an independent fair
    /// coin flip between the two parents.
    pub fn crossover(&mut self, first: &Genome, second: &Genome, rng: &mut impl Rng) -> Genome {
        self.total_crossovers += 1;

        let x = self.pick(first.x, second.x, rng);
        let y = self.pick(first.y, second.y, rng);
        let r = self.pick(first.color.r, second.color.r, rng);
        let g = self.pick(first.color.g, second.color.g, rng);
        let b = self.pick(first.color.b, second.color.b, rng);

        Genome::new(x, y, Color::new(r, g, b))
    }

    fn pick<T>(&mut self, from_first: T, from_second: T, rng: &mut impl Rng) -> T {
        if rng.gen::<bool>() {
            self.fields_from_first += 1;
            from_first
        } else {
            self.fields_from_second += 1;
            from_second
        }
    }

    /// Share of fields taken from the first parent
    pub fn first_parent_share(&self) -> f64 {
        let total = self.fields_from_first + self.fields_from_second;
        if total == 0 {
            0.0
        } else {
            self.fields_from_first as f64 / total as f64
        }
    }

    /// Get statistics as a string
    pub fn stats_string(&self) -> String {
        format!(
            "Crossovers: {} (first parent share: {:.1}%)",
            self.total_crossovers,
            self.first_parent_share() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn parents() -> (Genome, Genome) {
        (
            Genome::new(50, 100, Color::new(52, 201, 193)),
            Genome::new(200, 150, Color::new(217, 105, 31)),
        )
    }

    #[test]
    fn test_crossover_system_creation() {
        let system = CrossoverSystem::new();
        assert_eq!(system.total_crossovers, 0);
        assert_eq!(system.first_parent_share(), 0.0);
    }

    #[test]
    fn test_child_fields_come_from_parents() {
        let (a, b) = parents();
        let mut system = CrossoverSystem::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for _ in 0..200 {
            let child = system.crossover(&a, &b, &mut rng);
            assert!(child.x == a.x || child.x == b.x);
            assert!(child.y == a.y || child.y == b.y);
            assert!(child.color.r == a.color.r || child.color.r == b.color.r);
            assert!(child.color.g == a.color.g || child.color.g == b.color.g);
            assert!(child.color.b == a.color.b || child.color.b == b.color.b);
        }
        assert_eq!(system.total_crossovers, 200);
        assert_eq!(system.fields_from_first + system.fields_from_second, 1000);
    }

    #[test]
    fn test_crossover_fairness_per_field() {
        let (a, b) = parents();
        let mut system = CrossoverSystem::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let trials = 20_000;

        let mut from_a = [0u32; 5];
        // Joint count for x and r both from A; independence means ~25%
        let mut x_and_r = 0u32;
        for _ in 0..trials {
            let child = system.crossover(&a, &b, &mut rng);
            let picks = [
                child.x == a.x,
                child.y == a.y,
                child.color.r == a.color.r,
                child.color.g == a.color.g,
                child.color.b == a.color.b,
            ];
            for (count, picked) in from_a.iter_mut().zip(picks) {
                if picked {
                    *count += 1;
                }
            }
            if picks[0] && picks[2] {
                x_and_r += 1;
            }
        }

        for count in from_a {
            let share = count as f64 / trials as f64;
            assert!((share - 0.5).abs() < 0.02, "share {share} not near 0.5");
        }
        let joint = x_and_r as f64 / trials as f64;
        assert!((joint - 0.25).abs() < 0.02, "joint {joint} not near 0.25");
    }

    #[test]
    fn test_identical_parents_give_identical_child() {
        let (a, _) = parents();
        let mut system = CrossoverSystem::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(system.crossover(&a, &a, &mut rng), a);
    }
}
