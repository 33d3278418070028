//! Individuals and their identity.

use crate::color::Color;
use crate::genetics::Genome;
use serde::{Deserialize, Serialize};

/// Unique individual identifier
pub type IndividualId = u64;

/// Hands out identifiers in increasing order; never reuses one.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: IndividualId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> IndividualId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of identifiers issued so far
    pub fn issued(&self) -> u64 {
        self.next
    }
}

/// Cause of death tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    OldAge,
    Starvation,
    /// Removed by camouflage-based selection
    Predation,
    /// Culled by a biome's capacity
    Crowding,
    /// Culled by the global population ceiling
    Overpopulation,
}

/// A colored point-agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub id: IndividualId,
    pub genome: Genome,
    pub age: u32,
    pub max_age: u32,
    pub energy: i32,
    pub offspring_count: u32,
    pub generation: u32,
    /// Parent identifiers; lineage only, parents may be long gone
    pub parents: Option<(IndividualId, IndividualId)>,
}

impl Individual {
    /// A founder of the initial population
    pub fn founder(id: IndividualId, genome: Genome, age: u32, max_age: u32, energy: i32) -> Self {
        Self {
            id,
            genome,
            age,
            max_age,
            energy,
            offspring_count: 0,
            generation: 0,
            parents: None,
        }
    }

    /// A newborn of the two given parents
    pub fn offspring(
        id: IndividualId,
        genome: Genome,
        first: &Individual,
        second: &Individual,
        max_age: u32,
        energy: i32,
    ) -> Self {
        Self {
            id,
            genome,
            age: 0,
            max_age,
            energy,
            offspring_count: 0,
            generation: first.generation.max(second.generation) + 1,
            parents: Some((first.id, second.id)),
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.genome.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.genome.y
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.genome.color
    }

    /// Why the individual should die now, if it should
    pub fn death_cause(&self) -> Option<DeathCause> {
        if self.age >= self.max_age {
            Some(DeathCause::OldAge)
        } else if self.energy <= 0 {
            Some(DeathCause::Starvation)
        } else {
            None
        }
    }

    pub fn is_alive(&self) -> bool {
        self.death_cause().is_none()
    }

    /// Gain energy, capped at `max_energy`
    pub fn feed(&mut self, amount: i32, max_energy: i32) {
        self.energy = (self.energy + amount).min(max_energy);
    }

    pub fn can_reproduce(&self, reproductive_age: u32, cost: i32) -> bool {
        self.age >= reproductive_age && self.energy >= cost
    }
}

impl std::fmt::Display for Individual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} age {} energy {} [{}]",
            self.id, self.age, self.energy, self.genome
        )
    }
}
