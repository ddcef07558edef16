use rand::Rng;
use stackris_evaluator::playout::Playout;

use crate::{
    checkpoint::{CheckpointError, CheckpointStore},
    genetic::{EvolverConfigError, PopulationEvolver},
    population::{EvaluationError, Population},
};

/// Stopping and checkpoint cadence parameters for a training run.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Training stops once the fittest individual clears at least this many
    /// rows.
    pub convergence_target: u64,
    /// Hard cap on generations, `None` to run until convergence. The first
    /// generation is always evaluated, so a cap of 0 behaves like 1.
    pub max_generations: Option<u32>,
    /// Save a checkpoint every this many generations, `None` to never save.
    pub checkpoint_every: Option<u32>,
}

/// Anything that can stop a training run early.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainingError {
    #[display("invalid evolver configuration: {_0}")]
    Config(EvolverConfigError),
    #[display("fitness evaluation failed: {_0}")]
    Evaluation(EvaluationError),
    #[display("checkpoint store failed: {_0}")]
    Checkpoint(CheckpointError),
}

/// Result of a completed training run.
#[derive(Debug)]
pub struct TrainingOutcome {
    /// The final, fully evaluated population.
    pub population: Population,
    /// Number of generations evaluated.
    pub generations: u32,
    /// Whether the convergence target was reached (as opposed to hitting the
    /// generation cap).
    pub converged: bool,
}

/// Drives the evaluate / report / checkpoint / evolve loop.
#[derive(Debug, Clone, Copy)]
pub struct EvolutionEngine {
    pub evolver: PopulationEvolver,
    pub playout: Playout,
    pub config: EngineConfig,
}

impl EvolutionEngine {
    /// Runs training to convergence or the generation cap.
    ///
    /// Each generation: evaluate all unevaluated individuals, hand the
    /// population to the observer, save a checkpoint when the cadence says so,
    /// then evolve. The observer receives the 0-based generation index and the
    /// evaluated population; the driver uses it for progress reporting.
    pub fn run<R, S, F>(
        &self,
        mut population: Population,
        store: Option<&S>,
        mut observer: F,
        rng: &mut R,
    ) -> Result<TrainingOutcome, TrainingError>
    where
        R: Rng + ?Sized,
        S: CheckpointStore + ?Sized,
        F: FnMut(u32, &Population),
    {
        self.evolver.validate(population.len())?;

        let mut generation = 0;
        loop {
            population.evaluate_fitness(&self.playout, rng)?;
            observer(generation, &population);

            if let (Some(store), Some(every)) = (store, self.config.checkpoint_every) {
                if every > 0 && generation % every == 0 {
                    store.save(&population)?;
                }
            }

            let best = population
                .fittest()
                .and_then(|individual| individual.fitness().value())
                .unwrap_or(0);
            let converged = best >= self.config.convergence_target;
            let capped = self
                .config
                .max_generations
                .is_some_and(|max| generation + 1 >= max);
            if converged || capped {
                return Ok(TrainingOutcome {
                    population,
                    generations: generation + 1,
                    converged,
                });
            }

            population = self.evolver.evolve(&population, rng);
            generation += 1;
        }
    }
}
