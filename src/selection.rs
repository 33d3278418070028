//! Camouflage-based natural selection.
//!
//! Every individual's chance of dying grows linearly with how far its color
//! sits from the background color of the biome it stands in.

use crate::color::{Color, MAX_COLOR_DISTANCE};
use crate::ecology::Environment;
use crate::individual::Individual;
use crate::population::BiomePartition;
use rand::Rng;

/// Result of one selection pass over the population
#[derive(Debug, Default)]
pub struct SelectionOutcome {
    pub survivors: Vec<Individual>,
    pub killed: usize,
    /// Individuals that matched no biome and skipped selection
    pub unassigned: usize,
}

/// Converts color mismatch into a death probability
#[derive(Debug, Clone, Copy)]
pub struct NaturalSelection {
    /// Death probability at maximum color distance
    pub pressure: f64,
}

impl NaturalSelection {
    pub fn new(pressure: f64) -> Self {
        Self { pressure }
    }

    /// clamp(distance / max_distance * pressure, 0, 1)
    pub fn death_probability(&self, distance: f64) -> f64 {
        (distance / MAX_COLOR_DISTANCE * self.pressure).clamp(0.0, 1.0)
    }

    /// One survival draw against `background`
    pub fn survives(&self, individual: &Individual, background: &Color, rng: &mut impl Rng) -> bool {
        let p = self.death_probability(individual.color().distance(background));
        let roll: f64 = rng.gen();
        p <= 0.0 || roll > p
    }

    /// Filter residents of a single biome
    pub fn apply(
        &self,
        residents: Vec<Individual>,
        background: &Color,
        rng: &mut impl Rng,
    ) -> Vec<Individual> {
        residents
            .into_iter()
            .filter(|ind| self.survives(ind, background, rng))
            .collect()
    }

    /// Select every biome's residents against that biome's current color.
    ///
    /// Biomes are processed in list order. Individuals that fall in no biome
    /// are kept untouched and counted.
    pub fn apply_by_biome(
        &self,
        population: Vec<Individual>,
        environment: &Environment,
        rng: &mut impl Rng,
    ) -> SelectionOutcome {
        let before = population.len();
        let partition = BiomePartition::split(population, environment);
        let unassigned = partition.unassigned.len();

        let mut survivors = Vec::with_capacity(before);
        for (id, residents) in partition.residents.into_iter().enumerate() {
            if residents.is_empty() {
                continue;
            }
            let background = environment.biome(id).color;
            survivors.extend(self.apply(residents, &background, rng));
        }
        survivors.extend(partition.unassigned);

        SelectionOutcome {
            killed: before - survivors.len(),
            survivors,
            unassigned,
        }
    }
}
