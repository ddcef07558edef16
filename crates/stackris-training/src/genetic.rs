//! Genetic operators evolving one population into the next.
//!
//! Each generation is rebuilt from three slot groups, in order:
//!
//! 1. **Citizens** - bred in pairs: two tournament winners, an optional
//!    uniform crossover of their genes, then per-gene mutation.
//! 2. **Foreigners** - fresh random individuals injected for diversity.
//! 3. **Elites** - the top individuals of the previous generation, copied
//!    bit-identical with their cached fitness so they are not re-played.
//!
//! The loss gene never participates in crossover or mutation; see
//! [`weights`](crate::weights).

use rand::Rng;

use crate::{
    individual::Individual,
    population::Population,
    weights,
};

/// The slot split does not form a valid population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EvolverConfigError {
    /// `citizens + foreigners + elites` must equal the population size.
    #[display(
        "slot split {citizens}+{foreigners}+{elites} does not cover a population of {population}"
    )]
    SplitMismatch {
        citizens: usize,
        foreigners: usize,
        elites: usize,
        population: usize,
    },
    /// Citizens are bred in pairs, so their count must be even.
    #[display("citizen count {citizens} is odd")]
    OddCitizenCount { citizens: usize },
    /// A tournament needs at least one draw.
    #[display("tournament size must be at least 1")]
    EmptyTournament,
}

/// Evolution parameters; plain fields, validated by [`PopulationEvolver::validate`].
#[derive(Debug, Clone, Copy)]
pub struct PopulationEvolver {
    /// Individuals bred by tournament selection, crossover, and mutation.
    pub citizens: usize,
    /// Fresh random individuals injected each generation.
    pub foreigners: usize,
    /// Top individuals carried over unchanged.
    pub elites: usize,
    /// Draws per tournament; larger means stronger selection pressure.
    pub tournament_size: usize,
    /// Probability that a parent pair undergoes crossover at all.
    pub crossover_rate: f64,
    /// Per-gene swap probability once crossover is applied.
    pub uniform_rate: f64,
    /// Per-gene redraw probability for each bred citizen.
    pub mutation_rate: f64,
}

impl PopulationEvolver {
    /// Checks the slot split against a population of `population_size`.
    pub fn validate(&self, population_size: usize) -> Result<(), EvolverConfigError> {
        if self.citizens + self.foreigners + self.elites != population_size {
            return Err(EvolverConfigError::SplitMismatch {
                citizens: self.citizens,
                foreigners: self.foreigners,
                elites: self.elites,
                population: population_size,
            });
        }
        if self.citizens % 2 != 0 {
            return Err(EvolverConfigError::OddCitizenCount {
                citizens: self.citizens,
            });
        }
        if self.tournament_size == 0 {
            return Err(EvolverConfigError::EmptyTournament);
        }
        Ok(())
    }

    /// Produces the next generation from an evaluated population.
    ///
    /// Bred citizens and foreigners come out unevaluated; elites keep their
    /// cached fitness. The result has the same size as the input.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let mut next = Vec::with_capacity(population.len());

        for _ in 0..self.citizens / 2 {
            let first = self.tournament_select(population, rng);
            let second = self.tournament_select(population, rng);
            let (a, b) = self.breed(first, second, rng);
            next.push(a);
            next.push(b);
        }

        for _ in 0..self.foreigners {
            next.push(Individual::random(rng));
        }

        let ranked = population.sorted_ascending();
        next.extend(ranked[ranked.len() - self.elites..].iter().cloned());

        Population::from_individuals(next)
    }

    /// Draws `tournament_size` individuals with replacement; the fittest of
    /// the draws wins, the earliest draw on ties.
    fn tournament_select<'a, R>(&self, population: &'a Population, rng: &mut R) -> &'a Individual
    where
        R: Rng + ?Sized,
    {
        let mut winner = population.get(rng.random_range(0..population.len()));
        for _ in 1..self.tournament_size {
            let challenger = population.get(rng.random_range(0..population.len()));
            if challenger.fitness() > winner.fitness() {
                winner = challenger;
            }
        }
        winner
    }

    /// Crosses two parents and mutates both children.
    fn breed<R>(
        &self,
        first: &Individual,
        second: &Individual,
        rng: &mut R,
    ) -> (Individual, Individual)
    where
        R: Rng + ?Sized,
    {
        let mut a = *first.weights();
        let mut b = *second.weights();

        if rng.random_bool(self.crossover_rate) {
            for gene in 0..weights::EVOLVED_GENES {
                if rng.random_bool(self.uniform_rate) {
                    (a[gene], b[gene]) = (b[gene], a[gene]);
                }
            }
        }

        for child in [&mut a, &mut b] {
            for gene in 0..weights::EVOLVED_GENES {
                if rng.random_bool(self.mutation_rate) {
                    child[gene] = weights::mutated_gene(gene, rng);
                }
            }
        }

        (Individual::from_weights(a), Individual::from_weights(b))
    }
}
