use std::thread;

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64Mcg;
use stackris_evaluator::{heuristic::NUM_HEURISTICS, playout::Playout};
use stackris_stats::descriptive::DescriptiveStats;

use crate::individual::{Fitness, Individual};

/// One or more fitness evaluation tasks panicked.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("{failed} fitness evaluation task(s) failed")]
pub struct EvaluationError {
    pub failed: usize,
}

/// A fixed-size, ordered collection of individuals evaluated together.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates a population of `count` random individuals.
    pub fn random<R>(count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count).map(|_| Individual::random(rng)).collect();
        Self { individuals }
    }

    /// Wraps an existing set of individuals, preserving their order.
    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> &Individual {
        &self.individuals[index]
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Evaluates every unevaluated individual in parallel.
    ///
    /// One scoped task is spawned per unevaluated individual; each task gets
    /// its own RNG seeded from the injected one and writes its own disjoint
    /// slot. All tasks are joined before returning. A panicking task fails the
    /// whole evaluation rather than leaving a silent zero behind.
    pub fn evaluate_fitness<R>(
        &mut self,
        playout: &Playout,
        rng: &mut R,
    ) -> Result<(), EvaluationError>
    where
        R: Rng + ?Sized,
    {
        let mut failed = 0;
        thread::scope(|s| {
            let mut tasks = Vec::new();
            for individual in &mut self.individuals {
                if individual.fitness() != Fitness::Unevaluated {
                    continue;
                }
                let playout = *playout;
                let mut task_rng = Pcg64Mcg::seed_from_u64(rng.random());
                tasks.push(s.spawn(move || individual.evaluate(&playout, &mut task_rng)));
            }
            for task in tasks {
                if task.join().is_err() {
                    failed += 1;
                }
            }
        });
        if failed == 0 {
            Ok(())
        } else {
            Err(EvaluationError { failed })
        }
    }

    /// Returns the individual with the highest fitness, earliest on ties.
    #[must_use]
    pub fn fittest(&self) -> Option<&Individual> {
        self.fittest_index().map(|index| &self.individuals[index])
    }

    /// Returns the runner-up individual, earliest on ties.
    #[must_use]
    pub fn second_fittest(&self) -> Option<&Individual> {
        let first = self.fittest_index()?;
        let mut best: Option<usize> = None;
        for (index, individual) in self.individuals.iter().enumerate() {
            if index == first {
                continue;
            }
            if best.is_none_or(|b| individual.fitness() > self.individuals[b].fitness()) {
                best = Some(index);
            }
        }
        best.map(|index| &self.individuals[index])
    }

    fn fittest_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (index, individual) in self.individuals.iter().enumerate() {
            if best.is_none_or(|b| individual.fitness() > self.individuals[b].fitness()) {
                best = Some(index);
            }
        }
        best
    }

    /// Returns a copy of the individuals in ascending fitness order.
    ///
    /// The sort is stable, so equally fit individuals keep their relative
    /// population order.
    #[must_use]
    pub fn sorted_ascending(&self) -> Vec<Individual> {
        let mut sorted = self.individuals.clone();
        sorted.sort_by(|a, b| a.fitness().cmp(&b.fitness()));
        sorted
    }

    /// Computes per-gene weight statistics across the population.
    #[must_use]
    pub fn compute_weight_stats(&self) -> Option<Vec<DescriptiveStats>> {
        (0..NUM_HEURISTICS)
            .map(|i| {
                DescriptiveStats::new(self.individuals.iter().map(|individual| {
                    individual.weights()[i]
                }))
            })
            .collect()
    }

    /// Computes fitness statistics across the population, treating
    /// unevaluated individuals as zero.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn compute_fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(
            self.individuals
                .iter()
                .map(|individual| individual.fitness().value().unwrap_or(0) as f64),
        )
    }
}
