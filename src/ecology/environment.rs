//! The partitioned world: biomes, their bounds, and their resource sources.

use crate::ecology::biome::{Biome, BiomeId, BiomeSpec, Bounds};
use crate::ecology::layout::{self, LayoutError};
use crate::ecology::resources::{ResourceConfig, ResourceSource};
use rand::Rng;

/// Rectangular world tiled by biomes
#[derive(Debug, Clone)]
pub struct Environment {
    pub width: i32,
    pub height: i32,
    /// Ordered biome list; a biome's index is its `BiomeId`
    pub biomes: Vec<Biome>,
}

impl Environment {
    /// Lay out `specs` over a `width` x `height` world.
    pub fn new(
        width: i32,
        height: i32,
        specs: &[BiomeSpec],
        max_population: usize,
    ) -> Result<Self, LayoutError> {
        let allocations = layout::partition(specs, width, height, max_population)?;

        let biomes: Vec<Biome> = specs
            .iter()
            .zip(allocations)
            .map(|(spec, alloc)| Biome::new(spec, alloc.bounds, alloc.capacity))
            .collect();

        debug_assert!(
            layout::tiles_exactly(
                &biomes.iter().map(|b| b.bounds).collect::<Vec<_>>(),
                width,
                height
            ),
            "biome bounds must tile the environment"
        );

        Ok(Self {
            width,
            height,
            biomes,
        })
    }

    /// Whole-world rectangle
    pub fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width, self.height)
    }

    /// First biome (in list order) whose bounds contain the point.
    ///
    /// Biomes never overlap, so at most one can match. Points on the far
    /// edge (x == width or y == height) match none.
    pub fn locate(&self, x: i32, y: i32) -> Option<BiomeId> {
        self.biomes.iter().position(|b| b.bounds.contains(x, y))
    }

    pub fn biome(&self, id: BiomeId) -> &Biome {
        &self.biomes[id]
    }

    pub fn biome_name(&self, id: Option<BiomeId>) -> &str {
        id.map(|i| self.biomes[i].name.as_str()).unwrap_or("none")
    }

    /// Create each biome's resource sources at random positions.
    pub fn seed_resources(&mut self, config: &ResourceConfig, rng: &mut impl Rng) {
        for biome in &mut self.biomes {
            biome.sources = (0..config.sources_per_biome)
                .map(|_| {
                    ResourceSource::random_in(&biome.bounds, config.radius, biome.energy_yield, rng)
                })
                .collect();
        }
    }

    pub fn drift_resources(&mut self, intensity: i32, rng: &mut impl Rng) {
        for biome in &mut self.biomes {
            let bounds = biome.bounds;
            for source in &mut biome.sources {
                source.drift(&bounds, intensity, rng);
            }
        }
    }

    pub fn drift_colors(&mut self, intensity: i32, rng: &mut impl Rng) {
        for biome in &mut self.biomes {
            biome.color.drift(intensity, rng);
        }
    }

    /// Sum of all biome capacities
    pub fn total_capacity(&self) -> usize {
        self.biomes.iter().map(|b| b.capacity).sum()
    }

    /// Human-readable layout table
    pub fn describe(&self) -> String {
        let mut out = format!("Environment {}x{}\n", self.width, self.height);
        out.push_str(&"-".repeat(72));
        out.push('\n');
        for biome in &self.biomes {
            out.push_str(&format!(
                "{:<12} | {:5.1}% | capacity {:<6} | {} | {}\n",
                biome.name,
                biome.proportion * 100.0,
                biome.capacity,
                biome.bounds,
                biome.color,
            ));
        }
        out
    }
}
