//! Command-line trainer: evolves brains generation by generation.

use std::process::ExitCode;

use clap::Parser;

use flappy_evo::logging;
use flappy_evo::simulation::evolution::{EvolutionEngine, GenerationReport};
use flappy_evo::simulation::gaps::SeededGaps;
use flappy_evo::simulation::params::{DecisionMode, Params};

/// Trains flappy-bird brains by neuro-evolution.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON parameter file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<String>,
    /// Maximum number of generations
    #[arg(short, long)]
    generations: Option<u32>,
    /// Agents per generation
    #[arg(short, long)]
    population: Option<usize>,
    /// Seed of the obstacle gaps
    #[arg(short, long)]
    seed: Option<u64>,
    /// Ticks after which a generation is cut off
    #[arg(long)]
    tick_cap: Option<u64>,
    /// Evaluate pilots on the rayon thread pool
    #[arg(long)]
    parallel: bool,
    /// Write all generation reports to this JSON file
    #[arg(short, long)]
    report: Option<String>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut params = match &args.config {
        Some(path) => Params::load_from_file(path)?,
        None => Params::default(),
    };
    if let Some(generations) = args.generations {
        params.evolution.generations = generations;
    }
    if let Some(population) = args.population {
        params.evolution.population_size = population;
    }
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    if let Some(tick_cap) = args.tick_cap {
        params.evolution.tick_cap = Some(tick_cap);
    }
    if args.parallel {
        params.decision_mode = DecisionMode::Parallel;
    }
    params.validate()?;

    log::info!(
        "training {} agents for up to {} generations (seed {:#x}, {:?} decisions)",
        params.evolution.population_size,
        params.evolution.generations,
        params.seed,
        params.decision_mode
    );

    let mut engine = EvolutionEngine::new(&params.evolution)?;
    let mut reports: Vec<GenerationReport> = Vec::new();

    for _ in 0..params.evolution.generations {
        // Every generation faces the same field
        let report = engine.evaluate(&params, Box::new(SeededGaps::new(params.seed)))?;
        reports.push(report);

        if engine.is_solved() {
            log::info!("solved after {} generations", engine.generation());
            break;
        }
        engine.breed();
    }

    if let Some(best) = engine.best() {
        log::info!("best fitness {:.2}", best.fitness);
    }

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&reports)?;
        std::fs::write(path, json)?;
        log::info!("wrote {} reports to {}", reports.len(), path);
    }

    Ok(())
}
