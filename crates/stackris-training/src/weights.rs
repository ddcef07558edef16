//! Weight vector operations for the genetic algorithm.
//!
//! Initialization and mutation both redraw genes uniformly, from different
//! magnitudes: initialization stays close to zero so the first generation
//! spreads evenly over a small box, while mutation redraws from a much wider
//! range to escape local optima.
//!
//! Two genes are special-cased:
//!
//! - The rows-cleared gene is drawn from a *negative* range. Move selection
//!   minimizes the weighted score, so a negative coefficient rewards clearing.
//! - The loss gene is pinned at [`LOSS_WEIGHT`] and excluded from every
//!   genetic operator; the optimizer never needs to learn that losing is bad.

use rand::Rng;
use stackris_evaluator::heuristic::{NUM_HEURISTICS, WeightVector, feature};

/// Fixed coefficient on the loss indicator.
pub const LOSS_WEIGHT: f64 = 5000.0;

/// Magnitude of the uniform range genes are initialized from.
pub const INIT_MAGNITUDE: f64 = 50.0;

/// Magnitude of the uniform range mutated genes are redrawn from.
pub const MUTATION_MAGNITUDE: f64 = 1000.0;

/// Number of evolved genes; indices `0..EVOLVED_GENES` participate in
/// crossover and mutation, the loss gene does not.
pub const EVOLVED_GENES: usize = feature::LOST;

/// Draws a random weight vector with the designed per-gene ranges.
pub fn random<R>(rng: &mut R) -> WeightVector
where
    R: Rng + ?Sized,
{
    let mut weights = [0.0; NUM_HEURISTICS];
    for (index, weight) in weights.iter_mut().enumerate().take(EVOLVED_GENES) {
        *weight = draw(index, INIT_MAGNITUDE, rng);
    }
    weights[feature::LOST] = LOSS_WEIGHT;
    weights
}

/// Redraws a single evolved gene from the mutation range.
pub fn mutated_gene<R>(index: usize, rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    debug_assert!(index < EVOLVED_GENES);
    draw(index, MUTATION_MAGNITUDE, rng)
}

fn draw<R>(index: usize, magnitude: f64, rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    if index == feature::ROWS_CLEARED {
        rng.random_range(-magnitude..=0.0)
    } else {
        rng.random_range(0.0..=magnitude)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn test_random_weights_respect_gene_ranges() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        for _ in 0..100 {
            let weights = random(&mut rng);
            for (index, weight) in weights.iter().enumerate().take(EVOLVED_GENES) {
                if index == feature::ROWS_CLEARED {
                    assert!((-INIT_MAGNITUDE..=0.0).contains(weight), "gene {index}");
                } else {
                    assert!((0.0..=INIT_MAGNITUDE).contains(weight), "gene {index}");
                }
            }
            assert_eq!(weights[feature::LOST], LOSS_WEIGHT);
        }
    }

    #[test]
    fn test_mutated_gene_uses_wider_range() {
        let mut rng = Pcg64Mcg::seed_from_u64(2);
        let mut widest: f64 = 0.0;
        for _ in 0..1000 {
            let gene = mutated_gene(feature::HOLES, &mut rng);
            assert!((0.0..=MUTATION_MAGNITUDE).contains(&gene));
            widest = widest.max(gene);
        }
        // 1000 uniform draws over [0, 1000] exceed the init magnitude with
        // overwhelming probability.
        assert!(widest > INIT_MAGNITUDE);
        let cleared = mutated_gene(feature::ROWS_CLEARED, &mut rng);
        assert!((-MUTATION_MAGNITUDE..=0.0).contains(&cleared));
    }
}
