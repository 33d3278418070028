//! Environment model: biome partitioning and resource sources.
//!
//! This module contains:
//! - Biome regions and their specs
//! - The slicing layout that tiles the world with biomes
//! - Drifting resource sources
//! - The environment that ties them together

pub mod biome;
pub mod environment;
pub mod layout;
pub mod resources;

pub use biome::{Biome, BiomeId, BiomeSpec, Bounds};
pub use environment::Environment;
pub use layout::{Allocation, LayoutError};
pub use resources::{ResourceConfig, ResourceSource};
