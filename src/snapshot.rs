//! Per-step, per-individual records handed to a logging sink.

use crate::ecology::Environment;
use crate::individual::{Individual, IndividualId};
use serde::{Deserialize, Serialize};

/// One individual's state at the end of a step
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndividualRecord {
    pub step: u64,
    pub id: IndividualId,
    pub age: u32,
    pub energy: i32,
    pub x: i32,
    pub y: i32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Resident biome name, or "none"
    pub biome: String,
}

impl IndividualRecord {
    pub fn new(step: u64, individual: &Individual, environment: &Environment) -> Self {
        let biome = environment.locate(individual.x(), individual.y());
        let color = individual.color();
        Self {
            step,
            id: individual.id,
            age: individual.age,
            energy: individual.energy,
            x: individual.x(),
            y: individual.y(),
            r: color.r,
            g: color.g,
            b: color.b,
            biome: environment.biome_name(biome).to_string(),
        }
    }

    /// Records for a whole population, in population order
    pub fn collect(step: u64, population: &[Individual], environment: &Environment) -> Vec<Self> {
        population
            .iter()
            .map(|ind| Self::new(step, ind, environment))
            .collect()
    }
}

/// Consumer of the per-step record stream, called once per step in step order
pub trait SnapshotSink {
    fn record_step(&mut self, step: u64, records: &[IndividualRecord]) -> std::io::Result<()>;

    /// Sinks that discard everything can skip record construction
    fn wants_records(&self) -> bool {
        true
    }
}

/// In-memory sink keeping the full stream
impl SnapshotSink for Vec<IndividualRecord> {
    fn record_step(&mut self, _step: u64, records: &[IndividualRecord]) -> std::io::Result<()> {
        self.extend_from_slice(records);
        Ok(())
    }
}

/// Sink that drops every record
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn record_step(&mut self, _step: u64, _records: &[IndividualRecord]) -> std::io::Result<()> {
        Ok(())
    }

    fn wants_records(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::ecology::BiomeSpec;
    use crate::genetics::Genome;

    #[test]
    fn test_record_fields() {
        let specs = vec![BiomeSpec::new("meadow", 1.0, Color::BLACK, 1)];
        let env = Environment::new(50, 50, &specs, 10).unwrap();
        let ind = Individual::founder(4, Genome::new(3, 7, Color::new(1, 2, 3)), 9, 20, 33);

        let rec = IndividualRecord::new(12, &ind, &env);
        assert_eq!(rec.step, 12);
        assert_eq!(rec.id, 4);
        assert_eq!((rec.age, rec.energy), (9, 33));
        assert_eq!((rec.x, rec.y), (3, 7));
        assert_eq!((rec.r, rec.g, rec.b), (1, 2, 3));
        assert_eq!(rec.biome, "meadow");

        let outside = Individual::founder(5, Genome::new(50, 7, Color::BLACK), 0, 20, 1);
        assert_eq!(IndividualRecord::new(1, &outside, &env).biome, "none");
    }

    #[test]
    fn test_vec_sink_accumulates() {
        let mut sink: Vec<IndividualRecord> = Vec::new();
        let rec = IndividualRecord {
            step: 1,
            id: 0,
            age: 0,
            energy: 1,
            x: 0,
            y: 0,
            r: 0,
            g: 0,
            b: 0,
            biome: "none".into(),
        };
        sink.record_step(1, &[rec.clone()]).unwrap();
        sink.record_step(2, &[rec.clone(), rec]).unwrap();
        assert_eq!(sink.len(), 3);
        assert!(sink.wants_records());
        assert!(!NullSink.wants_records());
    }
}
