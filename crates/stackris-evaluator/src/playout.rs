use rand::Rng;
use stackris_engine::{Board, PieceCatalog};

use crate::move_selector::MoveSelector;

/// Plays complete games with a [`MoveSelector`] and scores rows cleared.
///
/// A playout runs `rounds` independent games and reports the integer mean of
/// rows cleared across them. Each game draws pieces uniformly at random from
/// the injected RNG and ends when a placement tops out or the optional move
/// cap is reached. The move cap bounds evaluation time for weight vectors
/// that would otherwise survive indefinitely.
#[derive(Debug, Clone, Copy)]
pub struct Playout {
    /// Number of independent games averaged per evaluation.
    pub rounds: u32,
    /// Upper bound on placements per game, `None` for unbounded.
    pub move_cap: Option<u32>,
}

impl Default for Playout {
    fn default() -> Self {
        Self {
            rounds: 1,
            move_cap: None,
        }
    }
}

impl Playout {
    /// Runs all rounds and returns the mean rows cleared, rounded down.
    #[must_use]
    pub fn run<R: Rng + ?Sized>(&self, selector: &MoveSelector, rng: &mut R) -> u64 {
        assert!(self.rounds > 0, "playout needs at least one round");
        let mut total = 0;
        for _ in 0..self.rounds {
            total += u64::from(self.run_round(selector, rng));
        }
        total / u64::from(self.rounds)
    }

    /// Plays a single game to top-out or the move cap.
    fn run_round<R: Rng + ?Sized>(&self, selector: &MoveSelector, rng: &mut R) -> u32 {
        let mut board = Board::new(PieceCatalog::standard());
        let mut moves = 0;
        while self.move_cap.is_none_or(|cap| moves < cap) {
            let piece = rng.random();
            let mv = selector.pick_move(&board, piece);
            if board.try_place(piece, mv).is_err() {
                break;
            }
            moves += 1;
        }
        board.rows_cleared()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::heuristic::{NUM_HEURISTICS, feature};

    fn survival_weights() -> MoveSelector {
        // Penalize height and loss so the selector keeps the stack low.
        let mut weights = [0.0; NUM_HEURISTICS];
        weights[feature::AGGREGATE_HEIGHT] = 1.0;
        weights[feature::HOLES] = 1.0;
        weights[feature::LOST] = 1000.0;
        MoveSelector::new(weights)
    }

    #[test]
    fn test_playout_is_deterministic_for_a_seed() {
        let playout = Playout {
            rounds: 2,
            move_cap: Some(200),
        };
        let selector = survival_weights();
        let first = playout.run(&selector, &mut Pcg64Mcg::seed_from_u64(11));
        let second = playout.run(&selector, &mut Pcg64Mcg::seed_from_u64(11));
        assert_eq!(first, second);
    }

    #[test]
    fn test_move_cap_bounds_the_game() {
        // With zero allowed moves every round scores zero, regardless of
        // weights.
        let playout = Playout {
            rounds: 3,
            move_cap: Some(0),
        };
        let selector = survival_weights();
        assert_eq!(playout.run(&selector, &mut Pcg64Mcg::seed_from_u64(1)), 0);
    }

    #[test]
    fn test_unbounded_playout_ends_by_top_out() {
        // Weights that reward height drive the game to a quick loss.
        let mut weights = [0.0; NUM_HEURISTICS];
        weights[feature::AGGREGATE_HEIGHT] = -1.0;
        let selector = MoveSelector::new(weights);
        let playout = Playout {
            rounds: 1,
            move_cap: None,
        };
        // Terminates: the stack only grows, so top-out is inevitable.
        let _ = playout.run(&selector, &mut Pcg64Mcg::seed_from_u64(3));
    }

    #[test]
    fn test_mean_is_integer_floor() {
        let playout = Playout {
            rounds: 4,
            move_cap: Some(50),
        };
        let selector = survival_weights();
        let mean = playout.run(&selector, &mut Pcg64Mcg::seed_from_u64(9));
        // 50 placements clear at most 50 * 4 / 10 = 20 rows.
        assert!(mean <= 20);
    }
}
