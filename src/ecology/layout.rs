//! Slicing the world rectangle into biome regions.
//!
//! Biomes are placed largest-first. Each one takes a slice from the leading
//! edge of the still-unallocated rectangle, cutting across its longer side,
//! sized by the biome's share of the proportion mass that is still unplaced.
//! The last biome takes whatever remains, so integer rounding never leaves a gap.
//!
//! Every biome receives at least one row or column, and every cut leaves at
//! least one for the biomes after it.

use crate::ecology::biome::{BiomeSpec, Bounds};
use thiserror::Error;

/// Errors raised while partitioning the environment
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("environment must contain at least one biome")]
    NoBiomes,
    #[error("biome proportions sum to zero")]
    DegenerateProportions,
    #[error("environment dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("no room left to place biome '{name}' in a {width}x{height} remainder")]
    EnvironmentTooSmall {
        name: String,
        width: i32,
        height: i32,
    },
}

/// Region and capacity assigned to one biome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub bounds: Bounds,
    pub capacity: usize,
}

/// Compute every biome's bounds and capacity.
///
/// The result is in the same order as `specs`.
pub fn partition(
    specs: &[BiomeSpec],
    width: i32,
    height: i32,
    max_population: usize,
) -> Result<Vec<Allocation>, LayoutError> {
    if width <= 0 || height <= 0 {
        return Err(LayoutError::InvalidDimensions { width, height });
    }
    if specs.is_empty() {
        return Err(LayoutError::NoBiomes);
    }

    let proportions: Vec<f64> = specs.iter().map(BiomeSpec::clamped_proportion).collect();
    if proportions.iter().all(|&p| p <= 0.0) {
        return Err(LayoutError::DegenerateProportions);
    }

    // Stable sort: equal proportions keep input order
    let mut order: Vec<usize> = (0..specs.len()).collect();
    order.sort_by(|&a, &b| proportions[b].total_cmp(&proportions[a]));

    let env_area = width as i64 * height as i64;
    let mut remaining = Bounds::from_size(width, height);
    let mut allocations: Vec<Option<Allocation>> = vec![None; specs.len()];

    for (rank, &idx) in order.iter().enumerate() {
        let bounds = if rank + 1 == order.len() {
            remaining
        } else {
            let unplaced: f64 = order[rank..].iter().map(|&i| proportions[i]).sum();
            let share = if unplaced > 0.0 {
                proportions[idx] / unplaced
            } else {
                0.0
            };

            let vertical = remaining.width() > remaining.height();
            let size = if vertical {
                remaining.width()
            } else {
                remaining.height()
            };
            if size < 2 {
                return Err(LayoutError::EnvironmentTooSmall {
                    name: specs[idx].name.clone(),
                    width: remaining.width(),
                    height: remaining.height(),
                });
            }

            let slice = ((share * size as f64).floor() as i32).clamp(1, size - 1);
            let (taken, rest) = if vertical {
                remaining.split_columns(slice)
            } else {
                remaining.split_rows(slice)
            };
            remaining = rest;
            taken
        };

        let capacity = capacity_for(bounds.area(), env_area, max_population);
        log::trace!(
            "biome '{}' -> {} (capacity {})",
            specs[idx].name,
            bounds,
            capacity
        );
        allocations[idx] = Some(Allocation { bounds, capacity });
    }

    Ok(allocations.into_iter().flatten().collect())
}

/// floor(area / env_area * max_population), in exact integer arithmetic
fn capacity_for(area: i64, env_area: i64, max_population: usize) -> usize {
    ((area as u128 * max_population as u128) / env_area as u128) as usize
}

/// True when the regions cover `width` x `height` exactly once.
pub fn tiles_exactly(regions: &[Bounds], width: i32, height: i32) -> bool {
    let env = Bounds::from_size(width, height);
    let inside = regions.iter().all(|b| {
        !b.is_empty()
            && b.x_start >= env.x_start
            && b.x_end <= env.x_end
            && b.y_start >= env.y_start
            && b.y_end <= env.y_end
    });
    if !inside {
        return false;
    }
    for (i, a) in regions.iter().enumerate() {
        if regions[i + 1..].iter().any(|b| a.overlaps(b)) {
            return false;
        }
    }
    // Disjoint and contained: equal total area means full coverage
    regions.iter().map(Bounds::area).sum::<i64>() == env.area()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use proptest::prelude::*;

    fn spec(name: &str, proportion: f64) -> BiomeSpec {
        BiomeSpec::new(name, proportion, Color::BLACK, 10)
    }

    #[test]
    fn test_two_equal_biomes_vertical_cut() {
        let specs = vec![spec("a", 0.5), spec("b", 0.5)];
        let alloc = partition(&specs, 100, 50, 1000).unwrap();

        assert_eq!(alloc[0].bounds, Bounds::new(0, 49, 0, 49));
        assert_eq!(alloc[1].bounds, Bounds::new(50, 99, 0, 49));
        assert_eq!(alloc[0].capacity, 500);
        assert_eq!(alloc[1].capacity, 500);
    }

    #[test]
    fn test_horizontal_cut_when_not_wider() {
        let specs = vec![spec("a", 0.25), spec("b", 0.75)];
        let alloc = partition(&specs, 40, 40, 100).unwrap();

        // "b" is placed first and takes 30 of 40 rows
        assert_eq!(alloc[1].bounds, Bounds::new(0, 39, 0, 29));
        assert_eq!(alloc[0].bounds, Bounds::new(0, 39, 30, 39));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let specs = vec![spec("first", 0.3), spec("second", 0.3), spec("third", 0.4)];
        let alloc = partition(&specs, 300, 100, 100).unwrap();

        // third (largest) leads, then first, then second
        assert_eq!(alloc[2].bounds.x_start, 0);
        assert!(alloc[0].bounds.x_start < alloc[1].bounds.x_start);
    }

    #[test]
    fn test_proportions_need_not_sum_to_one() {
        let specs = vec![spec("a", 0.5), spec("b", 0.5), spec("c", 0.5)];
        let alloc = partition(&specs, 90, 30, 90).unwrap();
        let regions: Vec<Bounds> = alloc.iter().map(|a| a.bounds).collect();
        assert!(tiles_exactly(&regions, 90, 30));
        // A third of 90 columns, give or take float rounding
        assert!((29..=30).contains(&alloc[0].bounds.width()));
    }

    #[test]
    fn test_last_biome_takes_remainder() {
        let specs = vec![spec("a", 0.33), spec("b", 0.33), spec("c", 0.34)];
        let alloc = partition(&specs, 101, 7, 1000).unwrap();
        let regions: Vec<Bounds> = alloc.iter().map(|a| a.bounds).collect();
        assert!(tiles_exactly(&regions, 101, 7));
    }

    #[test]
    fn test_tiny_share_gets_minimum_slice() {
        let specs = vec![spec("huge", 1.0), spec("speck", 0.0001), spec("rest", 0.5)];
        let alloc = partition(&specs, 1000, 10, 100).unwrap();
        let regions: Vec<Bounds> = alloc.iter().map(|a| a.bounds).collect();

        assert!(tiles_exactly(&regions, 1000, 10));
        assert!(alloc.iter().all(|a| a.bounds.area() > 0));
    }

    #[test]
    fn test_zero_proportion_biome_still_placed() {
        let specs = vec![spec("a", 1.0), spec("zero", 0.0), spec("b", 1.0)];
        let alloc = partition(&specs, 60, 20, 100).unwrap();
        let regions: Vec<Bounds> = alloc.iter().map(|a| a.bounds).collect();
        assert!(tiles_exactly(&regions, 60, 20));
    }

    #[test]
    fn test_empty_list_rejected() {
        assert_eq!(partition(&[], 10, 10, 10), Err(LayoutError::NoBiomes));
    }

    #[test]
    fn test_all_zero_rejected() {
        let specs = vec![spec("a", 0.0), spec("b", -1.0)];
        assert_eq!(
            partition(&specs, 10, 10, 10),
            Err(LayoutError::DegenerateProportions)
        );
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        let specs = vec![spec("a", 1.0)];
        assert!(matches!(
            partition(&specs, 0, 10, 10),
            Err(LayoutError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_too_small_environment_rejected() {
        let specs = vec![spec("a", 1.0), spec("b", 1.0), spec("c", 1.0)];
        assert!(matches!(
            partition(&specs, 1, 2, 10),
            Err(LayoutError::EnvironmentTooSmall { .. })
        ));
    }

    #[test]
    fn test_single_biome_covers_everything() {
        let alloc = partition(&[spec("only", 0.2)], 37, 11, 500).unwrap();
        assert_eq!(alloc[0].bounds, Bounds::from_size(37, 11));
        assert_eq!(alloc[0].capacity, 500);
    }

    proptest! {
        #[test]
        fn prop_layout_tiles_environment(
            width in 10i32..300,
            height in 10i32..300,
            proportions in prop::collection::vec(0.05f64..1.0, 1..8),
            max_population in 0usize..10_000,
        ) {
            let specs: Vec<BiomeSpec> = proportions
                .iter()
                .enumerate()
                .map(|(i, &p)| spec(&format!("b{i}"), p))
                .collect();

            let alloc = partition(&specs, width, height, max_population).unwrap();
            let regions: Vec<Bounds> = alloc.iter().map(|a| a.bounds).collect();

            prop_assert_eq!(alloc.len(), specs.len());
            prop_assert!(tiles_exactly(&regions, width, height));
            let total: usize = alloc.iter().map(|a| a.capacity).sum();
            prop_assert!(total <= max_population);
        }
    }
}
