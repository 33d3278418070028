//! # CAMOUFLAGE
//!
//! Evolution of color camouflage in a world split into biomes.
//!
//! Colored point individuals live on a rectangular world carved into
//! rectangular biomes. Each step they age, feed from their biome's resource
//! sources, wander, face selection proportional to how far their color sits
//! from the biome's background color, pair up with nearby mates, and are
//! thinned to the biome and global carrying capacities.
//!
//! ## Features
//!
//! - **Camouflage selection**: death probability linear in color distance
//! - **Spatial mating**: crossover plus mutation of position and color
//! - **Configurable**: YAML configuration files
//! - **Reproducible**: Seeded random number generation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use camouflage::{Config, World};
//! use camouflage::snapshot::NullSink;
//!
//! // Create world with default config
//! let config = Config::default();
//! let mut world = World::new(config).unwrap();
//!
//! // Run simulation
//! let report = world.run(1000, &mut NullSink).unwrap();
//!
//! // Check results
//! println!("Population: {}", report.final_population);
//! println!("Max generation: {}", world.stats.generation_max);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use camouflage::Config;
//!
//! let mut config = Config::default();
//! config.population.initial_count = 200;
//! config.evolution.mutation_rate = 0.1;
//! ```

pub mod analysis;
pub mod color;
pub mod config;
pub mod ecology;
pub mod genetics;
pub mod individual;
pub mod population;
pub mod reproduction;
pub mod selection;
pub mod snapshot;
pub mod stats;
pub mod view;
pub mod world;

// Re-export main types
pub use color::Color;
pub use config::Config;
pub use individual::Individual;
pub use snapshot::{IndividualRecord, SnapshotSink};
pub use world::{RunReport, SimulationError, Termination, World};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Outcome of [`simulate`]
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub report: RunReport,
    /// Population after the last completed step
    pub population: Vec<Individual>,
    /// Every step's records, in step order
    pub records: Vec<IndividualRecord>,
}

/// Run a configured simulation to completion, keeping the full record stream.
pub fn simulate(config: Config) -> Result<SimulationResult, SimulationError> {
    let steps = config.simulation.steps;
    let mut world = World::new(config)?;
    let mut records = Vec::new();
    let report = world.run(steps, &mut records)?;

    Ok(SimulationResult {
        report,
        population: world.population,
        records,
    })
}

/// Run a quick benchmark
pub fn benchmark(steps: u64, population: usize) -> Result<BenchmarkResult, SimulationError> {
    use crate::snapshot::NullSink;
    use std::time::Instant;

    let mut config = Config::default();
    config.population.initial_count = population;
    config.world.max_population = config.world.max_population.max(population);
    config.simulation.seed = Some(0);

    let mut world = World::new(config)?;

    let start = Instant::now();
    let report = world.run(steps, &mut NullSink)?;
    let elapsed = start.elapsed();

    Ok(BenchmarkResult {
        steps: report.steps_completed,
        initial_population: population,
        final_population: report.final_population,
        elapsed_secs: elapsed.as_secs_f64(),
        steps_per_second: report.steps_completed as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
        max_generation: world.stats.generation_max,
    })
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub steps: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub elapsed_secs: f64,
    pub steps_per_second: f64,
    pub max_generation: u32,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Steps: {}", self.steps)?;
        writeln!(f, "Population: {} -> {}", self.initial_population, self.final_population)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} steps/s", self.steps_per_second)?;
        writeln!(f, "Max generation: {}", self.max_generation)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.world.width = 300;
        config.world.height = 200;
        config.world.max_population = 500;
        config.population.initial_count = 100;
        config.simulation.steps = 20;
        config.simulation.seed = Some(7);
        config
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_simulate_returns_stream() {
        let result = simulate(small_config()).unwrap();

        assert!(result.report.steps_completed <= 20);
        assert_eq!(result.report.final_population, result.population.len());
        if let Some(last) = result.records.last() {
            assert_eq!(last.step, result.report.steps_completed);
        }
    }

    #[test]
    fn test_simulate_rejects_bad_config() {
        let mut config = small_config();
        config.world.width = 0;
        assert!(simulate(config).is_err());
    }

    #[test]
    fn test_benchmark() {
        let result = benchmark(20, 50).unwrap();

        assert!(result.steps <= 20);
        assert_eq!(result.initial_population, 50);
        assert!(result.steps_per_second >= 0.0);
    }
}
