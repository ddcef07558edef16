use stackris_engine::{Board, Move, PieceKind};

use crate::heuristic::{HeuristicVector, WeightVector};

/// Picks the legal move with the minimum weighted heuristic score.
///
/// Every legal placement of the current piece is simulated on a
/// [`Board::preview`] copy and scored by the dot product of the resulting
/// [`HeuristicVector`] with the bound weights. Ties go to the earliest move in
/// [`Board::legal_moves`] order, which keeps selection deterministic for a
/// given board, piece, and weight vector.
#[derive(Debug, Clone, Copy)]
pub struct MoveSelector {
    weights: WeightVector,
}

impl MoveSelector {
    #[must_use]
    pub fn new(weights: WeightVector) -> Self {
        Self { weights }
    }

    /// Returns the bound weight vector.
    #[must_use]
    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// Scores a single candidate move.
    ///
    /// A placement that tops out still yields a score: the simulated board is
    /// marked lost and the loss shows up through the loss-indicator feature,
    /// so the optimizer can steer away from it rather than the selector
    /// special-casing it.
    #[must_use]
    pub fn score_move(&self, board: &Board, piece: PieceKind, mv: Move) -> f64 {
        let mut preview = board.preview();
        // A top-out is reflected in the preview's lost flag.
        let _ = preview.try_place(piece, mv);
        HeuristicVector::from_board(&preview).weighted_score(&self.weights)
    }

    /// Picks the minimum-score move for the given piece.
    ///
    /// # Panics
    ///
    /// Panics if the piece has no legal moves, which cannot happen for the
    /// standard catalog on a standard-width board.
    #[must_use]
    pub fn pick_move(&self, board: &Board, piece: PieceKind) -> Move {
        let moves = board.legal_moves(piece);
        assert!(!moves.is_empty(), "piece {piece:?} has no legal moves");

        let mut best = moves[0];
        let mut best_score = self.score_move(board, piece, best);
        for &mv in &moves[1..] {
            let score = self.score_move(board, piece, mv);
            if score < best_score {
                best = mv;
                best_score = score;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use stackris_engine::PieceCatalog;

    use super::*;
    use crate::heuristic::feature;

    fn weights_with(index: usize, weight: f64) -> WeightVector {
        let mut weights = [0.0; crate::heuristic::NUM_HEURISTICS];
        weights[index] = weight;
        weights
    }

    #[test]
    fn test_zero_weights_tie_break_to_first_move() {
        let board = Board::new(PieceCatalog::standard());
        let selector = MoveSelector::new([0.0; crate::heuristic::NUM_HEURISTICS]);
        let mv = selector.pick_move(&board, PieceKind::I);
        assert_eq!(
            mv,
            Move {
                orientation: 0,
                slot: 0,
            }
        );
    }

    #[test]
    fn test_bumpiness_weight_prefers_flat_placement() {
        // On an empty board a flat I at slot 0 leaves bumpiness 1; every
        // vertical I leaves at least 4.
        let board = Board::new(PieceCatalog::standard());
        let selector = MoveSelector::new(weights_with(feature::BUMPINESS, 1.0));
        let mv = selector.pick_move(&board, PieceKind::I);
        assert_eq!(
            mv,
            Move {
                orientation: 1,
                slot: 0,
            }
        );
    }

    #[test]
    fn test_rows_cleared_reward_fills_the_gap() {
        // Only the vertical I in the gap column clears the bottom row.
        let board = Board::from_ascii(
            PieceCatalog::standard(),
            "
            #########.
            ",
        );
        let selector = MoveSelector::new(weights_with(feature::ROWS_CLEARED, -1.0));
        let mv = selector.pick_move(&board, PieceKind::I);
        assert_eq!(
            mv,
            Move {
                orientation: 0,
                slot: 9,
            }
        );
    }

    #[test]
    fn test_loss_weight_avoids_topping_out() {
        // Columns 0-8 are stacked to the ceiling; every placement except the
        // vertical I in column 9 tops out.
        let mut art = String::new();
        for _ in 0..20 {
            art.push_str("#########.\n");
        }
        let board = Board::from_ascii(PieceCatalog::standard(), &art);
        let selector = MoveSelector::new(weights_with(feature::LOST, 1.0));
        let mv = selector.pick_move(&board, PieceKind::I);
        assert_eq!(
            mv,
            Move {
                orientation: 0,
                slot: 9,
            }
        );
    }

    #[test]
    fn test_scoring_leaves_board_untouched() {
        let board = Board::from_ascii(
            PieceCatalog::standard(),
            "
            #########.
            ",
        );
        let selector = MoveSelector::new(weights_with(feature::ROWS_CLEARED, -1.0));
        let _ = selector.pick_move(&board, PieceKind::I);
        assert_eq!(board.rows_cleared(), 0);
        assert_eq!(board.turn_number(), 0);
        assert_eq!(board.top()[0], 1);
    }
}
