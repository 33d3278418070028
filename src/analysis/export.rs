//! Data export for analysis in external tools.

use crate::individual::Individual;
use crate::snapshot::{IndividualRecord, SnapshotSink};
use crate::world::World;
use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::Path;

const RECORD_HEADER: &str = "step,id,age,energy,x,y,r,g,b,biome";

/// Snapshot sink writing one CSV row per individual per step
pub struct CsvSink<W: Write> {
    writer: W,
    header_written: bool,
    rows: u64,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
            rows: 0,
        }
    }

    /// Rows written so far, header excluded
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) a CSV file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> SnapshotSink for CsvSink<W> {
    fn record_step(&mut self, _step: u64, records: &[IndividualRecord]) -> Result<()> {
        if !self.header_written {
            writeln!(self.writer, "{}", RECORD_HEADER)?;
            self.header_written = true;
        }

        for rec in records {
            writeln!(
                self.writer,
                "{},{},{},{},{},{},{},{},{},{}",
                rec.step,
                rec.id,
                rec.age,
                rec.energy,
                rec.x,
                rec.y,
                rec.r,
                rec.g,
                rec.b,
                rec.biome,
            )?;
        }
        self.rows += records.len() as u64;

        self.writer.flush()
    }
}

/// Export system for saving simulation data
pub struct ExportSystem;

impl ExportSystem {
    /// Export the current population to CSV
    pub fn export_population_csv<P: AsRef<Path>>(world: &World, path: P) -> Result<()> {
        let records = IndividualRecord::collect(world.time, &world.population, &world.environment);
        let mut sink = CsvSink::create(path)?;
        sink.record_step(world.time, &records)
    }

    /// Export parentage of the current population to CSV
    pub fn export_lineage_csv<P: AsRef<Path>>(population: &[Individual], path: P) -> Result<()> {
        let mut file = File::create(path)?;

        writeln!(file, "id,parent1_id,parent2_id,generation,offspring")?;

        for ind in population {
            let (p1, p2) = ind
                .parents
                .map_or((String::new(), String::new()), |(a, b)| {
                    (a.to_string(), b.to_string())
                });
            writeln!(
                file,
                "{},{},{},{},{}",
                ind.id, p1, p2, ind.generation, ind.offspring_count
            )?;
        }

        Ok(())
    }

    /// Export summary statistics
    pub fn export_summary<P: AsRef<Path>>(world: &World, path: P) -> Result<()> {
        let mut file = File::create(path)?;

        writeln!(file, "=== Camouflage Simulation Summary ===")?;
        writeln!(file, "Time: {}", world.time)?;
        writeln!(file, "Seed: {}", world.seed())?;
        writeln!(file, "Population: {}", world.population_size())?;
        writeln!(file, "Max Generation: {}", world.stats.generation_max)?;
        writeln!(file, "Mean Camouflage Mismatch: {:.3}", world.stats.camouflage_mean)?;
        writeln!(file)?;

        writeln!(file, "=== Biomes ===")?;
        for (biome, count) in world
            .environment
            .biomes
            .iter()
            .zip(world.stats.biome_populations.iter())
        {
            writeln!(
                file,
                "{:<12} {} residents / capacity {} | color {}",
                biome.name, count, biome.capacity, biome.color
            )?;
        }
        writeln!(file)?;

        writeln!(file, "=== Reproduction ===")?;
        writeln!(file, "Total Pairings: {}", world.reproduction.total_pairings)?;
        writeln!(file, "Mutated Offspring: {}", world.reproduction.total_mutations)?;
        writeln!(file, "{}", world.reproduction.crossover.stats_string())?;

        Ok(())
    }
}
