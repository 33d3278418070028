//! Statistics tracking for the simulation.

use crate::ecology::Environment;
use crate::individual::{DeathCause, Individual};
use serde::{Deserialize, Serialize};

/// Deaths in one step, broken down by cause
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deaths {
    pub old_age: usize,
    pub starvation: usize,
    pub predation: usize,
    pub crowding: usize,
    pub overpopulation: usize,
}

impl Deaths {
    pub fn record(&mut self, cause: DeathCause, count: usize) {
        match cause {
            DeathCause::OldAge => self.old_age += count,
            DeathCause::Starvation => self.starvation += count,
            DeathCause::Predation => self.predation += count,
            DeathCause::Crowding => self.crowding += count,
            DeathCause::Overpopulation => self.overpopulation += count,
        }
    }

    pub fn total(&self) -> usize {
        self.old_age + self.starvation + self.predation + self.crowding + self.overpopulation
    }
}

/// Statistics snapshot for a simulation step
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Current simulation time
    pub time: u64,
    /// Total population count
    pub population: usize,
    /// Births this step
    pub births: usize,
    /// Deaths this step
    pub deaths: Deaths,
    /// Individuals outside every biome during selection this step
    pub unassigned: usize,
    /// Mean energy across individuals
    pub energy_mean: f32,
    /// Mean age across individuals
    pub age_mean: f32,
    /// Mean normalized color mismatch against the resident biome
    pub camouflage_mean: f32,
    /// Maximum generation alive
    pub generation_max: u32,
    /// Resident count per biome, in biome order
    pub biome_populations: Vec<usize>,
}

impl Stats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the population-derived fields
    pub fn update(&mut self, population: &[Individual], environment: &Environment) {
        self.population = population.len();
        self.biome_populations = vec![0; environment.biomes.len()];

        if population.is_empty() {
            self.energy_mean = 0.0;
            self.age_mean = 0.0;
            self.camouflage_mean = 0.0;
            self.generation_max = 0;
            return;
        }

        let n = population.len() as f32;
        self.energy_mean = population.iter().map(|i| i.energy as f32).sum::<f32>() / n;
        self.age_mean = population.iter().map(|i| i.age as f32).sum::<f32>() / n;
        self.generation_max = population.iter().map(|i| i.generation).max().unwrap_or(0);

        let mut mismatch_sum = 0.0f64;
        let mut located = 0usize;
        for ind in population {
            if let Some(id) = environment.locate(ind.x(), ind.y()) {
                self.biome_populations[id] += 1;
                mismatch_sum += ind.color().mismatch(&environment.biome(id).color);
                located += 1;
            }
        }
        self.camouflage_mean = if located > 0 {
            (mismatch_sum / located as f64) as f32
        } else {
            0.0
        };
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "T:{:6} | Pop:{:5} | Born:{:4} | Died:{:4} (age {} starve {} eaten {} crowd {} cap {}) | Gen:{:4} | Energy:{:.0} | Camo:{:.3}",
            self.time,
            self.population,
            self.births,
            self.deaths.total(),
            self.deaths.old_age,
            self.deaths.starvation,
            self.deaths.predation,
            self.deaths.crowding,
            self.deaths.overpopulation,
            self.generation_max,
            self.energy_mean,
            self.camouflage_mean,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval,
        }
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Get population over time
    pub fn population_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.time, s.population))
            .collect()
    }

    /// Get mean camouflage mismatch over time
    pub fn camouflage_series(&self) -> Vec<(u64, f32)> {
        self.snapshots
            .iter()
            .map(|s| (s.time, s.camouflage_mean))
            .collect()
    }

    /// Save history to file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
