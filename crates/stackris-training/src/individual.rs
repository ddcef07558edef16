use rand::Rng;
use stackris_evaluator::{heuristic::WeightVector, move_selector::MoveSelector, playout::Playout};

use crate::weights;

/// Evaluation state of an individual.
///
/// Fitness is computed at most once per weight state: genetic operators
/// produce fresh `Unevaluated` individuals instead of invalidating a cached
/// score in place, so an `Evaluated` value is always the playout score of the
/// current weights. The derived ordering ranks `Unevaluated` below every
/// evaluated score and evaluated scores by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Fitness {
    Unevaluated,
    Evaluated(u64),
}

impl Fitness {
    /// Returns the evaluated score, `None` when unevaluated.
    #[must_use]
    pub fn value(self) -> Option<u64> {
        match self {
            Fitness::Unevaluated => None,
            Fitness::Evaluated(score) => Some(score),
        }
    }
}

/// One candidate solution: a weight vector and its cached fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    weights: WeightVector,
    fitness: Fitness,
}

impl Individual {
    /// Creates an individual with random weights in the designed ranges.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_weights(weights::random(rng))
    }

    /// Wraps an existing weight vector as a fresh, unevaluated individual.
    #[must_use]
    pub fn from_weights(weights: WeightVector) -> Self {
        Self {
            weights,
            fitness: Fitness::Unevaluated,
        }
    }

    #[must_use]
    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    #[must_use]
    pub fn fitness(&self) -> Fitness {
        self.fitness
    }

    /// Runs the playout and caches the score; a no-op when already evaluated.
    pub fn evaluate<R>(&mut self, playout: &Playout, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        if matches!(self.fitness, Fitness::Evaluated(_)) {
            return;
        }
        let selector = MoveSelector::new(self.weights);
        self.fitness = Fitness::Evaluated(playout.run(&selector, rng));
    }
}

#[cfg(test)]
impl Individual {
    /// Builds an individual with a pre-set evaluated score.
    pub(crate) fn evaluated(weights: WeightVector, score: u64) -> Self {
        Self {
            weights,
            fitness: Fitness::Evaluated(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;
    use stackris_evaluator::heuristic::{NUM_HEURISTICS, feature};

    use super::*;

    fn survival_weights() -> WeightVector {
        let mut weights = [0.0; NUM_HEURISTICS];
        weights[feature::AGGREGATE_HEIGHT] = 1.0;
        weights[feature::HOLES] = 2.0;
        weights[feature::LOST] = weights::LOSS_WEIGHT;
        weights
    }

    #[test]
    fn test_fitness_ordering() {
        assert!(Fitness::Unevaluated < Fitness::Evaluated(0));
        assert!(Fitness::Evaluated(0) < Fitness::Evaluated(10));
        assert_eq!(Fitness::Evaluated(3).value(), Some(3));
        assert_eq!(Fitness::Unevaluated.value(), None);
    }

    #[test]
    fn test_from_weights_starts_unevaluated() {
        let individual = Individual::from_weights(survival_weights());
        assert_eq!(individual.fitness(), Fitness::Unevaluated);
        assert_eq!(individual.weights(), &survival_weights());
    }

    #[test]
    fn test_evaluate_caches_the_first_score() {
        let playout = Playout {
            rounds: 1,
            move_cap: Some(100),
        };
        let mut individual = Individual::from_weights(survival_weights());
        individual.evaluate(&playout, &mut Pcg64Mcg::seed_from_u64(5));
        let first = individual.fitness();
        assert!(matches!(first, Fitness::Evaluated(_)));

        // A second evaluation with a different RNG must not overwrite the
        // cached score.
        individual.evaluate(&playout, &mut Pcg64Mcg::seed_from_u64(99));
        assert_eq!(individual.fitness(), first);
    }
}
