//! World simulation engine - main simulation loop.

use crate::config::{Config, ConfigError};
use crate::ecology::{Environment, LayoutError};
use crate::individual::{DeathCause, IdGenerator, Individual};
use crate::population::{self, PopulationController};
use crate::reproduction::ReproductionSystem;
use crate::selection::NaturalSelection;
use crate::snapshot::{IndividualRecord, NullSink, SnapshotSink};
use crate::stats::{Deaths, Stats, StatsHistory};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Errors that stop a simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("snapshot sink error: {0}")]
    Sink(#[from] std::io::Error),
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// All requested steps were simulated
    BudgetExhausted,
    /// No individual left alive
    Extinct,
    /// The caller asked to stop
    Halted,
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub steps_completed: u64,
    pub termination: Termination,
    pub final_population: usize,
}

/// The simulation world
pub struct World {
    // Population
    pub population: Vec<Individual>,

    // Environment
    pub environment: Environment,

    // State
    pub time: u64,

    // Configuration
    pub config: Config,

    // Statistics
    pub stats: Stats,
    pub stats_history: StatsHistory,

    // Evolution
    pub reproduction: ReproductionSystem,
    selection: NaturalSelection,
    controller: PopulationController,

    // ID generation
    ids: IdGenerator,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,

    // Per-step counters
    births_this_step: usize,
    deaths_this_step: Deaths,
    unassigned_this_step: usize,
}

impl World {
    /// Create a new world; uses the configured seed, or a random one.
    pub fn new(config: Config) -> Result<Self, SimulationError> {
        let seed = config
            .simulation
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        Self::new_with_seed(config, seed)
    }

    /// Create a new world with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, seed: u64) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut environment = Environment::new(
            config.world.width,
            config.world.height,
            &config.biomes,
            config.world.max_population,
        )?;
        environment.seed_resources(&config.resources, &mut rng);

        let mut ids = IdGenerator::new();
        let population = population::seed_population(&environment, &config, &mut ids, &mut rng);

        log::info!(
            "World created: {}x{}, {} biomes, population {}, seed {}",
            environment.width,
            environment.height,
            environment.biomes.len(),
            population.len(),
            seed
        );

        let mut world = Self {
            population,
            environment,
            time: 0,
            stats: Stats::new(),
            stats_history: StatsHistory::new(config.logging.stats_interval),
            reproduction: ReproductionSystem::from_config(&config),
            selection: NaturalSelection::new(config.evolution.selection_pressure),
            controller: PopulationController::new(config.world.max_population),
            config,
            ids,
            rng,
            seed,
            births_this_step: 0,
            deaths_this_step: Deaths::default(),
            unassigned_this_step: 0,
        };
        world.update_stats();

        Ok(world)
    }

    /// Swap in a hand-built population. Future identifiers continue past
    /// the largest one present.
    pub fn replace_population(&mut self, population: Vec<Individual>) {
        let max_id = population.iter().map(|i| i.id).max();
        if let Some(max_id) = max_id {
            while self.ids.issued() <= max_id {
                self.ids.next_id();
            }
        }
        self.population = population;
        self.update_stats();
    }

    /// Main simulation step, discarding the snapshot stream
    pub fn step(&mut self) -> Result<(), SimulationError> {
        self.step_with(&mut NullSink)
    }

    /// Main simulation step, emitting this step's records to `sink`
    pub fn step_with(&mut self, sink: &mut dyn SnapshotSink) -> Result<(), SimulationError> {
        self.births_this_step = 0;
        self.deaths_this_step = Deaths::default();
        self.unassigned_this_step = 0;

        // Phase 1: Environment drift
        self.drift_environment();

        // Phase 2: Aging and feeding
        self.age_and_feed();

        // Phase 3: Movement
        self.migrate();

        // Phase 4: Biome assignment and camouflage selection
        self.apply_selection();

        // Phase 5: Reproduction
        self.handle_reproduction();

        // Phase 6: Death and capacity control
        self.control_population();

        self.time += 1;

        // Phase 7: Statistics
        self.update_stats();

        // Phase 8: Snapshot emission
        if sink.wants_records() {
            let records = IndividualRecord::collect(self.time, &self.population, &self.environment);
            sink.record_step(self.time, &records)?;
        }

        Ok(())
    }

    /// Drift resource sources, then biome colors
    fn drift_environment(&mut self) {
        self.environment
            .drift_resources(self.config.resources.drift_intensity, &mut self.rng);
        self.environment
            .drift_colors(self.config.climate.color_drift_intensity, &mut self.rng);
    }

    /// Age everyone by one step and feed from the resident biome's sources
    fn age_and_feed(&mut self) {
        let max_energy = self.config.population.max_energy;
        for ind in &mut self.population {
            ind.age += 1;
            if let Some(biome) = self.environment.locate(ind.x(), ind.y()) {
                if let Some(energy) = self.environment.biome(biome).forage(ind.x(), ind.y()) {
                    ind.feed(energy, max_energy);
                }
            }
        }
    }

    /// Random walk within the migration intensity, paying the move cost
    fn migrate(&mut self) {
        let intensity = self.config.population.migration_intensity;
        let cost = self.config.population.move_cost;
        let (width, height) = (self.environment.width, self.environment.height);

        for ind in &mut self.population {
            let dx = self.rng.gen_range(-intensity..=intensity);
            let dy = self.rng.gen_range(-intensity..=intensity);
            ind.genome.x = ind.genome.x.saturating_add(dx);
            ind.genome.y = ind.genome.y.saturating_add(dy);
            ind.genome.clamp_position(width, height);
            ind.energy -= cost;
        }
    }

    fn apply_selection(&mut self) {
        let population = std::mem::take(&mut self.population);
        let outcome = self
            .selection
            .apply_by_biome(population, &self.environment, &mut self.rng);

        self.deaths_this_step
            .record(DeathCause::Predation, outcome.killed);
        self.unassigned_this_step = outcome.unassigned;
        self.population = outcome.survivors;
    }

    fn handle_reproduction(&mut self) {
        let offspring =
            self.reproduction
                .reproduce(&mut self.population, &mut self.ids, &mut self.rng);
        self.births_this_step = offspring.len();
        self.population.extend(offspring);
    }

    fn control_population(&mut self) {
        let population = std::mem::take(&mut self.population);
        self.population = self.controller.control(
            population,
            &self.environment,
            &mut self.deaths_this_step,
            &mut self.rng,
        );
    }

    /// Update statistics
    fn update_stats(&mut self) {
        self.stats.time = self.time;
        self.stats.births = self.births_this_step;
        self.stats.deaths = self.deaths_this_step;
        self.stats.unassigned = self.unassigned_this_step;
        self.stats.update(&self.population, &self.environment);

        log::debug!("{}", self.stats.summary());

        // Record history
        if self.time > 0 && self.time % self.config.logging.stats_interval == 0 {
            self.stats_history.record(self.stats.clone());
        }
    }

    /// Run up to `steps` steps, streaming records to `sink`
    pub fn run(
        &mut self,
        steps: u64,
        sink: &mut dyn SnapshotSink,
    ) -> Result<RunReport, SimulationError> {
        self.run_until(steps, sink, |_| false)
    }

    /// Run up to `steps` steps, stopping early once `halt` returns true.
    ///
    /// Before every step the run stops if the population is empty or `halt`
    /// returns true; a step is never interrupted midway.
    pub fn run_until<F>(
        &mut self,
        steps: u64,
        sink: &mut dyn SnapshotSink,
        mut halt: F,
    ) -> Result<RunReport, SimulationError>
    where
        F: FnMut(&World) -> bool,
    {
        let mut completed = 0;
        let termination = loop {
            if self.is_extinct() {
                log::info!("Population extinct at step {}", self.time);
                break Termination::Extinct;
            }
            if completed >= steps {
                break Termination::BudgetExhausted;
            }
            if halt(self) {
                log::info!("Run halted at step {}", self.time);
                break Termination::Halted;
            }
            self.step_with(sink)?;
            completed += 1;
        };

        Ok(RunReport {
            steps_completed: completed,
            termination,
            final_population: self.population_size(),
        })
    }

    /// Get current population count
    pub fn population_size(&self) -> usize {
        self.population.len()
    }

    /// Check if population is extinct
    pub fn is_extinct(&self) -> bool {
        self.population.is_empty()
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
