//! Population seeding, biome partitioning, and capacity control.

use crate::color::Color;
use crate::config::Config;
use crate::ecology::Environment;
use crate::genetics::Genome;
use crate::individual::{DeathCause, IdGenerator, Individual};
use crate::stats::Deaths;
use rand::seq::SliceRandom;
use rand::Rng;

/// A population split by resident biome
#[derive(Debug, Default)]
pub struct BiomePartition {
    /// Residents per biome, indexed by `BiomeId`
    pub residents: Vec<Vec<Individual>>,
    /// Individuals whose position matches no biome
    pub unassigned: Vec<Individual>,
}

impl BiomePartition {
    /// Assign every individual to the first biome containing it.
    pub fn split(population: Vec<Individual>, environment: &Environment) -> Self {
        let mut residents: Vec<Vec<Individual>> = vec![Vec::new(); environment.biomes.len()];
        let mut unassigned = Vec::new();

        for individual in population {
            match environment.locate(individual.x(), individual.y()) {
                Some(id) => residents[id].push(individual),
                None => unassigned.push(individual),
            }
        }

        if !unassigned.is_empty() {
            log::debug!(
                "{} individual(s) outside every biome",
                unassigned.len()
            );
        }

        Self {
            residents,
            unassigned,
        }
    }

    /// Reassemble: biomes in order, then the unassigned.
    pub fn into_population(self) -> Vec<Individual> {
        let total = self.residents.iter().map(Vec::len).sum::<usize>() + self.unassigned.len();
        let mut population = Vec::with_capacity(total);
        for group in self.residents {
            population.extend(group);
        }
        population.extend(self.unassigned);
        population
    }
}

/// Create the founding population.
///
/// The count is spread evenly over the biomes, the remainder going to the
/// first ones. Founders get a random position inside their biome, a random
/// color, and a random age in `[0, max_age]`.
pub fn seed_population(
    environment: &Environment,
    config: &Config,
    ids: &mut IdGenerator,
    rng: &mut impl Rng,
) -> Vec<Individual> {
    let count = config.population.initial_count;
    let biome_count = environment.biomes.len();
    let mut population = Vec::with_capacity(count);
    if biome_count == 0 {
        return population;
    }

    let per_biome = count / biome_count;
    let remainder = count % biome_count;

    for (i, biome) in environment.biomes.iter().enumerate() {
        let quota = per_biome + usize::from(i < remainder);
        for _ in 0..quota {
            let (x, y) = biome.bounds.random_point(rng);
            let genome = Genome::new(x, y, Color::random(rng));
            let age = rng.gen_range(0..=config.population.max_age);
            population.push(Individual::founder(
                ids.next_id(),
                genome,
                age,
                config.population.max_age,
                config.population.initial_energy,
            ));
        }
    }

    population
}

/// Keep a uniform random sample of `keep` members; no-op if there are no more than that.
pub fn sample_without_replacement<T>(members: &mut Vec<T>, keep: usize, rng: &mut impl Rng) {
    if members.len() <= keep {
        return;
    }
    members.shuffle(rng);
    members.truncate(keep);
}

/// Enforces death by age/starvation and the biome and global ceilings
#[derive(Debug, Clone)]
pub struct PopulationController {
    pub max_population: usize,
}

impl PopulationController {
    pub fn new(max_population: usize) -> Self {
        Self { max_population }
    }

    /// Run all three stages in order: death filter, per-biome cap, global cap.
    pub fn control(
        &self,
        population: Vec<Individual>,
        environment: &Environment,
        deaths: &mut Deaths,
        rng: &mut impl Rng,
    ) -> Vec<Individual> {
        let mut population = population;
        Self::remove_dead(&mut population, deaths);
        let mut population = Self::enforce_biome_capacity(population, environment, deaths, rng);
        self.enforce_global_capacity(&mut population, deaths, rng);
        population
    }

    /// Drop individuals at or past their maximum age, or out of energy.
    pub fn remove_dead(population: &mut Vec<Individual>, deaths: &mut Deaths) {
        population.retain(|ind| match ind.death_cause() {
            Some(cause) => {
                deaths.record(cause, 1);
                false
            }
            None => true,
        });
    }

    /// Thin every over-capacity biome down to its capacity.
    ///
    /// Individuals outside every biome are not subject to a biome cap.
    pub fn enforce_biome_capacity(
        population: Vec<Individual>,
        environment: &Environment,
        deaths: &mut Deaths,
        rng: &mut impl Rng,
    ) -> Vec<Individual> {
        let mut partition = BiomePartition::split(population, environment);

        for (id, residents) in partition.residents.iter_mut().enumerate() {
            let capacity = environment.biome(id).capacity;
            let before = residents.len();
            sample_without_replacement(residents, capacity, rng);
            deaths.record(DeathCause::Crowding, before - residents.len());
        }

        partition.into_population()
    }

    /// Thin the whole population down to the global maximum.
    pub fn enforce_global_capacity(
        &self,
        population: &mut Vec<Individual>,
        deaths: &mut Deaths,
        rng: &mut impl Rng,
    ) {
        let before = population.len();
        sample_without_replacement(population, self.max_population, rng);
        deaths.record(DeathCause::Overpopulation, before - population.len());
    }
}
