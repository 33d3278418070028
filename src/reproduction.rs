//! Spatial mate pairing and offspring production.
//!
//! Pairing is greedy over a freshly shuffled list of eligible individuals:
//! each unclaimed individual takes the *first* unclaimed partner in range,
//! not the nearest. The pass is quadratic in the number of eligible
//! individuals.

use crate::config::Config;
use crate::genetics::{CrossoverSystem, Mutator};
use crate::individual::{IdGenerator, Individual};
use rand::seq::SliceRandom;
use rand::Rng;

/// Produces offspring from nearby eligible pairs
#[derive(Debug, Clone)]
pub struct ReproductionSystem {
    /// Minimum age to mate
    pub reproductive_age: u32,
    /// Energy each parent pays
    pub cost: i32,
    /// Maximum distance between mates
    pub max_distance: f64,
    /// Maximum age given to newborns
    pub offspring_max_age: u32,
    /// Starting energy of newborns
    pub offspring_energy: i32,
    pub crossover: CrossoverSystem,
    pub mutator: Mutator,
    /// Total pairs formed
    pub total_pairings: u64,
    /// Offspring whose genome mutated
    pub total_mutations: u64,
}

impl ReproductionSystem {
    pub fn from_config(config: &Config) -> Self {
        Self {
            reproductive_age: config.population.reproductive_age,
            cost: config.evolution.reproduction_cost,
            max_distance: config.evolution.reproduction_distance,
            offspring_max_age: config.population.max_age,
            offspring_energy: config.population.initial_energy,
            crossover: CrossoverSystem::new(),
            mutator: Mutator::new(
                config.evolution.mutation_rate,
                config.evolution.mutation_intensity,
                config.world.width,
                config.world.height,
            ),
            total_pairings: 0,
            total_mutations: 0,
        }
    }

    /// One pairing pass. Parents are charged in place; offspring are returned.
    pub fn reproduce(
        &mut self,
        population: &mut [Individual],
        ids: &mut IdGenerator,
        rng: &mut impl Rng,
    ) -> Vec<Individual> {
        let mut eligible: Vec<usize> = population
            .iter()
            .enumerate()
            .filter(|(_, ind)| ind.can_reproduce(self.reproductive_age, self.cost))
            .map(|(idx, _)| idx)
            .collect();
        eligible.shuffle(rng);

        let reach_sq = self.max_distance * self.max_distance;
        let mut claimed = vec![false; eligible.len()];
        let mut offspring = Vec::new();

        for i in 0..eligible.len() {
            if claimed[i] {
                continue;
            }
            let a = eligible[i];

            let partner = (0..eligible.len()).find(|&j| {
                j != i
                    && !claimed[j]
                    && population[a].genome.distance_sq(&population[eligible[j]].genome) as f64
                        <= reach_sq
            });
            let Some(j) = partner else {
                continue;
            };
            let b = eligible[j];

            let mut genome =
                self.crossover
                    .crossover(&population[a].genome, &population[b].genome, rng);
            if self.mutator.mutate(&mut genome, rng) {
                self.total_mutations += 1;
            }

            let child = Individual::offspring(
                ids.next_id(),
                genome,
                &population[a],
                &population[b],
                self.offspring_max_age,
                self.offspring_energy,
            );

            for parent in [a, b] {
                population[parent].energy -= self.cost;
                population[parent].offspring_count += 1;
            }
            claimed[i] = true;
            claimed[j] = true;
            self.total_pairings += 1;
            offspring.push(child);
        }

        offspring
    }
}
