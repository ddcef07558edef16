use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;
use stackris_evaluator::playout::Playout;
use stackris_training::{
    checkpoint::{CheckpointStore as _, FileCheckpointStore},
    engine::{EngineConfig, EvolutionEngine},
    genetic::PopulationEvolver,
    population::Population,
};

use crate::{model::TrainedModel, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of individuals per generation
    #[arg(long, default_value_t = 50)]
    population: usize,
    /// Fresh random individuals injected each generation
    #[arg(long, default_value_t = 4)]
    foreigners: usize,
    /// Top individuals carried over unchanged
    #[arg(long, default_value_t = 2)]
    elites: usize,
    /// Tournament draws per parent selection
    #[arg(long, default_value_t = 5)]
    tournament_size: usize,
    /// Probability that a parent pair undergoes crossover
    #[arg(long, default_value_t = 0.9)]
    crossover_rate: f64,
    /// Per-gene swap probability once crossover applies
    #[arg(long, default_value_t = 0.5)]
    uniform_rate: f64,
    /// Per-gene mutation probability
    #[arg(long, default_value_t = 0.1)]
    mutation_rate: f64,
    /// Games averaged per fitness evaluation
    #[arg(long, default_value_t = 5)]
    rounds: u32,
    /// Cap on placements per game
    #[arg(long)]
    move_cap: Option<u32>,
    /// Stop once the fittest individual clears this many rows
    #[arg(long, default_value_t = 10_000)]
    convergence_target: u64,
    /// Hard cap on generations
    #[arg(long)]
    max_generations: Option<u32>,
    /// Checkpoint file path
    #[arg(long)]
    checkpoint: Option<PathBuf>,
    /// Save a checkpoint every N generations (0 disables)
    #[arg(long, default_value_t = 1)]
    checkpoint_every: u32,
    /// Resume from a checkpoint file instead of a random population
    #[arg(long)]
    resume: Option<PathBuf>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Name recorded in the exported model
    #[arg(long, default_value = "stackris")]
    name: String,
    /// Output file path for the trained model JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    anyhow::ensure!(arg.rounds > 0, "--rounds must be at least 1");
    let mut rng = match arg.seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::from_rng(&mut rand::rng()),
    };

    let citizens = arg
        .population
        .checked_sub(arg.foreigners + arg.elites)
        .with_context(|| {
            format!(
                "population {} cannot fit {} foreigners and {} elites",
                arg.population, arg.foreigners, arg.elites
            )
        })?;
    let engine = EvolutionEngine {
        evolver: PopulationEvolver {
            citizens,
            foreigners: arg.foreigners,
            elites: arg.elites,
            tournament_size: arg.tournament_size,
            crossover_rate: arg.crossover_rate,
            uniform_rate: arg.uniform_rate,
            mutation_rate: arg.mutation_rate,
        },
        playout: Playout {
            rounds: arg.rounds,
            move_cap: arg.move_cap,
        },
        config: EngineConfig {
            convergence_target: arg.convergence_target,
            max_generations: arg.max_generations,
            checkpoint_every: (arg.checkpoint_every > 0).then_some(arg.checkpoint_every),
        },
    };

    let population = match &arg.resume {
        Some(path) => {
            let population = FileCheckpointStore::new(path)
                .load()
                .with_context(|| format!("Failed to resume from {}", path.display()))?;
            anyhow::ensure!(
                population.len() == arg.population,
                "checkpoint holds {} individuals, expected {}",
                population.len(),
                arg.population
            );
            eprintln!(
                "Resumed {} individuals from {}",
                population.len(),
                path.display()
            );
            population
        }
        None => Population::random(arg.population, &mut rng),
    };

    let store = arg.checkpoint.clone().map(FileCheckpointStore::new);
    let outcome = engine
        .run(population, store.as_ref(), report_generation, &mut rng)
        .context("training failed")?;

    if outcome.converged {
        eprintln!("Converged after {} generation(s).", outcome.generations);
    } else {
        eprintln!(
            "Generation cap reached after {} generation(s).",
            outcome.generations
        );
    }

    let ranked = outcome.population.sorted_ascending();
    eprintln!("Best individuals:");
    for (i, individual) in ranked.iter().rev().take(5).enumerate() {
        eprintln!(
            "  {i:2}: {:.3?} => {}",
            individual.weights(),
            individual.fitness().value().unwrap_or(0)
        );
    }

    let best = ranked.last().context("population is empty")?;
    let model = TrainedModel {
        name: arg.name.clone(),
        trained_at: Utc::now(),
        fitness: best.fitness().value().unwrap_or(0),
        weights: *best.weights(),
    };
    Output::save_json(&model, arg.output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Fitness: {}", model.fitness);

    Ok(())
}

fn report_generation(generation: u32, population: &Population) {
    eprintln!("Generation #{generation}:");
    if let Some(fittest) = population.fittest() {
        eprintln!(
            "  Fittest: {:.3?} => {}",
            fittest.weights(),
            fittest.fitness().value().unwrap_or(0)
        );
    }
    if let Some(stats) = population.compute_fitness_stats() {
        eprintln!("  Fitness Stats:");
        eprintln!("    Min:  {:.3}", stats.min);
        eprintln!("    Max:  {:.3}", stats.max);
        eprintln!("    Mean: {:.3}", stats.mean);
    }
    if let Some(weight_stats) = population.compute_weight_stats() {
        eprintln!("  Weights Stats:");
        eprintln!(
            "    Min:        {:.3?}",
            weight_stats.iter().map(|s| s.min).collect::<Vec<_>>(),
        );
        eprintln!(
            "    Max:        {:.3?}",
            weight_stats.iter().map(|s| s.max).collect::<Vec<_>>(),
        );
        eprintln!(
            "    Mean:       {:.3?}",
            weight_stats.iter().map(|s| s.mean).collect::<Vec<_>>(),
        );
        #[expect(clippy::cast_precision_loss)]
        let spread = weight_stats
            .iter()
            .map(|s| s.normalized_std_dev)
            .sum::<f64>()
            / weight_stats.len() as f64;
        eprintln!("    NormStddev: {spread:.3}");
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    #[derive(Debug, clap::Parser)]
    struct TestArgs {
        #[clap(flatten)]
        arg: TrainArg,
    }

    #[test]
    fn test_zero_rounds_is_rejected_before_training() {
        let args = TestArgs::try_parse_from(["train", "--rounds", "0"]).unwrap();
        let err = run(&args.arg).unwrap_err();
        assert!(err.to_string().contains("--rounds"), "{err}");
    }
}
