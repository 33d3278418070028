//! Camouflage - CLI Entry Point
//!
//! Biome-partitioned camouflage evolution simulator.

use camouflage::analysis::{CsvSink, ExportSystem};
use camouflage::ecology::Environment;
use camouflage::snapshot::{NullSink, SnapshotSink};
use camouflage::world::Termination;
use camouflage::{benchmark, Config, World};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "camouflage")]
#[command(version)]
#[command(about = "Camouflage evolution simulator over a biome-partitioned world")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a new simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of steps to simulate (defaults to the configured value)
        #[arg(short, long)]
        steps: Option<u64>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// CSV file receiving one row per individual per step
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file receiving the stats history
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },

    /// Print the biome layout computed from a configuration
    Layout {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of steps
        #[arg(short, long, default_value = "1000")]
        steps: u64,

        /// Population size
        #[arg(short, long, default_value = "1000")]
        population: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            steps,
            seed,
            output,
            stats,
            quiet,
        } => run_simulation(config, steps, seed, output, stats, quiet),

        Commands::Init { output } => {
            init_logging("info");
            generate_config(output)
        }

        Commands::Layout { config } => {
            init_logging("info");
            show_layout(config)
        }

        Commands::Benchmark { steps, population } => {
            init_logging("info");
            run_benchmark(steps, population)
        }
    }
}

fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn load_config(path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        println!("Loading config from: {:?}", path);
        Ok(Config::from_file(path)?)
    } else {
        println!("Using default configuration");
        Ok(Config::default())
    }
}

fn run_simulation(
    config_path: PathBuf,
    steps: Option<u64>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    stats_path: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&config_path)?;
    init_logging(&config.logging.log_level);

    if seed.is_some() {
        config.simulation.seed = seed;
    }
    let steps = steps.unwrap_or(config.simulation.steps);
    let stats_interval = config.logging.stats_interval;

    let mut world = World::new(config)?;

    println!("Starting simulation");
    println!("  Seed: {}", world.seed());
    println!("  Initial population: {}", world.population_size());
    println!(
        "  World: {}x{}, {} biomes",
        world.environment.width,
        world.environment.height,
        world.environment.biomes.len()
    );
    println!("  Steps: {}", steps);
    println!();

    let mut sink: Box<dyn SnapshotSink> = match &output {
        Some(path) => Box::new(CsvSink::create(path)?),
        None => Box::new(NullSink),
    };

    let start = Instant::now();
    let report = world.run_until(steps, sink.as_mut(), |w| {
        if !quiet && w.time > 0 && w.time % stats_interval == 0 {
            log::info!("{}", w.stats.summary());
        }
        false
    })?;
    let elapsed = start.elapsed();

    if report.termination == Termination::Extinct {
        println!("\nPopulation extinct at step {}", world.time);
    }

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Steps: {}", report.steps_completed);
    println!(
        "Speed: {:.1} steps/s",
        report.steps_completed as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    println!("Final population: {}", report.final_population);
    println!("Max generation: {}", world.stats.generation_max);
    println!("Mean camouflage mismatch: {:.3}", world.stats.camouflage_mean);

    if let Some(path) = output {
        println!("Records: {:?}", path);
        let lineage = path.with_extension("lineage.csv");
        ExportSystem::export_lineage_csv(&world.population, &lineage)?;
        println!("Lineage: {:?}", lineage);
    }

    if let Some(path) = stats_path {
        world.stats_history.save(&path.to_string_lossy())?;
        println!("Stats history: {:?}", path);
    }

    Ok(())
}

fn show_layout(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&config_path)?;
    let environment = Environment::new(
        config.world.width,
        config.world.height,
        &config.biomes,
        config.world.max_population,
    )?;

    println!("{}", environment.describe());
    println!(
        "Total capacity: {} / {}",
        environment.total_capacity(),
        config.world.max_population
    );
    Ok(())
}

fn run_benchmark(steps: u64, population: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Camouflage Benchmark ===");
    println!("Steps: {}", steps);
    println!("Population: {}", population);
    println!();

    let result = benchmark(steps, population)?;
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
