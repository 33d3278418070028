//! Configuration system for the camouflage simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use crate::color::Color;
use crate::ecology::{BiomeSpec, ResourceConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    #[serde(default = "default_biomes")]
    pub biomes: Vec<BiomeSpec>,
    pub population: PopulationConfig,
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub resources: ResourceConfig,
    #[serde(default)]
    pub climate: ClimateConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// World/environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: i32,
    pub height: i32,
    /// Global population ceiling; biome capacities are carved out of it
    pub max_population: usize,
}

/// Individual life-cycle parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of individuals at start, spread evenly over the biomes
    pub initial_count: usize,
    /// Age at which an individual dies
    pub max_age: u32,
    /// Minimum age to reproduce
    pub reproductive_age: u32,
    /// Energy of founders and newborns
    pub initial_energy: i32,
    /// Energy ceiling when feeding
    pub max_energy: i32,
    /// Energy spent on each move
    pub move_cost: i32,
    /// Maximum per-axis displacement per step
    pub migration_intensity: i32,
}

/// Genetics and selection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Probability that an offspring genome mutates
    pub mutation_rate: f64,
    /// Positional mutation half-range (color uses twice this)
    pub mutation_intensity: i32,
    /// Scales normalized camouflage mismatch into death probability
    pub selection_pressure: f64,
    /// Maximum distance between mates
    pub reproduction_distance: f64,
    /// Energy each parent pays per offspring
    pub reproduction_cost: i32,
}

/// Background color variation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClimateConfig {
    /// Per-channel drift of every biome color per step
    pub color_drift_intensity: i32,
}

/// Run length and seeding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Step budget
    pub steps: u64,
    /// Fixed seed; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Parameters handed to a renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// World-space radius used to draw an individual
    pub display_radius: f64,
    pub screen_width: u32,
    pub screen_height: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Steps between stats history records
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            biomes: default_biomes(),
            population: PopulationConfig::default(),
            evolution: EvolutionConfig::default(),
            resources: ResourceConfig::default(),
            climate: ClimateConfig::default(),
            simulation: SimulationConfig::default(),
            render: RenderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            max_population: 5000,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_count: 2000,
            max_age: 85,
            reproductive_age: 10,
            initial_energy: 200,
            max_energy: 500,
            move_cost: 2,
            migration_intensity: 50,
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.08,
            mutation_intensity: 30,
            selection_pressure: 0.5,
            reproduction_distance: 50.0,
            reproduction_cost: 50,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 20_000,
            seed: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            display_radius: 5.0,
            screen_width: 1000,
            screen_height: 600,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 50,
            log_level: "info".to_string(),
        }
    }
}

/// The ten-biome world the simulator ships with
pub fn default_biomes() -> Vec<BiomeSpec> {
    vec![
        BiomeSpec::new("maritime", 0.10, Color::new(28, 107, 160), 50),
        BiomeSpec::new("forest", 0.20, Color::new(34, 139, 34), 40),
        BiomeSpec::new("desert", 0.20, Color::new(237, 201, 175), 90),
        BiomeSpec::new("polar", 0.50, Color::new(102, 183, 255), 200),
        BiomeSpec::new("savanna", 0.50, Color::new(189, 183, 107), 200),
        BiomeSpec::new("swamp", 0.50, Color::new(47, 79, 79), 200),
        BiomeSpec::new("mountain", 0.10, Color::new(139, 137, 137), 20),
        BiomeSpec::new("tundra", 0.50, Color::new(176, 224, 230), 200),
        BiomeSpec::new("plains", 0.10, Color::new(144, 238, 144), 20),
        BiomeSpec::new("volcanic", 0.10, Color::new(178, 34, 34), 90),
    ]
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.world.width <= 0 || self.world.height <= 0 {
            return invalid("world width and height must be > 0");
        }
        if self.biomes.is_empty() {
            return invalid("at least one biome is required");
        }
        if self.biomes.iter().any(|b| !b.proportion.is_finite()) {
            return invalid("biome proportions must be finite");
        }
        if self.biomes.iter().all(|b| b.clamped_proportion() <= 0.0) {
            return invalid("at least one biome needs a positive proportion");
        }
        if self.population.initial_count > self.world.max_population {
            return invalid("initial_count cannot exceed max_population");
        }
        if self.population.max_energy <= 0 {
            return invalid("max_energy must be > 0");
        }
        if self.population.initial_energy <= 0
            || self.population.initial_energy > self.population.max_energy
        {
            return invalid("initial_energy must be in (0, max_energy]");
        }
        if self.population.migration_intensity < 0
            || self.evolution.mutation_intensity < 0
            || self.resources.drift_intensity < 0
            || self.climate.color_drift_intensity < 0
        {
            return invalid("intensities must be >= 0");
        }
        if !(0.0..=1.0).contains(&self.evolution.mutation_rate) {
            return invalid("mutation_rate must be between 0 and 1");
        }
        if !self.evolution.selection_pressure.is_finite() || self.evolution.selection_pressure < 0.0
        {
            return invalid("selection_pressure must be a finite value >= 0");
        }
        if !self.evolution.reproduction_distance.is_finite()
            || self.evolution.reproduction_distance < 0.0
        {
            return invalid("reproduction_distance must be a finite value >= 0");
        }
        if !self.resources.radius.is_finite() || self.resources.radius < 0.0 {
            return invalid("resource radius must be a finite value >= 0");
        }
        if self.logging.stats_interval == 0 {
            return invalid("stats_interval must be > 0");
        }
        Ok(())
    }
}
