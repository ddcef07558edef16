use std::iter;

use stackris_engine::Board;

use crate::board_metrics::BoardMetrics;

/// Number of heuristic features.
pub const NUM_HEURISTICS: usize = 6;

/// Linear coefficients, one per heuristic feature, in [`feature`] index order.
///
/// The fixed length makes weight/feature index mismatch unrepresentable at
/// the API boundary; persistence code validates token counts when importing
/// weight vectors from text.
pub type WeightVector = [f64; NUM_HEURISTICS];

/// Feature indices shared by [`HeuristicVector`] and [`WeightVector`].
pub mod feature {
    /// Sum of per-column top markers.
    pub const AGGREGATE_HEIGHT: usize = 0;
    /// Rows cleared by the evaluated placement.
    pub const ROWS_CLEARED: usize = 1;
    /// Empty cells strictly under a column top.
    pub const HOLES: usize = 2;
    /// Sum of adjacent column height differences.
    pub const BUMPINESS: usize = 3;
    /// Narrow well penalty.
    pub const BAD_GAPS: usize = 4;
    /// 1 when the board is terminal, else 0.
    pub const LOST: usize = 5;
}

/// The six board features scored by a [`MoveSelector`](crate::move_selector::MoveSelector).
///
/// Feature order is fixed and must match [`WeightVector`] indexing exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicVector([f64; NUM_HEURISTICS]);

impl HeuristicVector {
    /// Extracts the heuristic vector from a board snapshot.
    ///
    /// The rows-cleared feature reads the board's cumulative counter; when the
    /// snapshot is a [`Board::preview`] copy this is the count cleared by the
    /// simulated placement alone.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let metrics = BoardMetrics::from_board(board);
        let mut values = [0.0; NUM_HEURISTICS];
        values[feature::AGGREGATE_HEIGHT] = f64::from(metrics.aggregate_height());
        values[feature::ROWS_CLEARED] = f64::from(board.rows_cleared());
        values[feature::HOLES] = f64::from(metrics.holes());
        values[feature::BUMPINESS] = f64::from(metrics.bumpiness());
        values[feature::BAD_GAPS] = f64::from(metrics.bad_gaps());
        values[feature::LOST] = if board.has_lost() { 1.0 } else { 0.0 };
        Self(values)
    }

    /// Returns the feature values in fixed order.
    #[must_use]
    pub fn values(&self) -> &[f64; NUM_HEURISTICS] {
        &self.0
    }

    /// Dot product with a weight vector.
    #[must_use]
    pub fn weighted_score(&self, weights: &WeightVector) -> f64 {
        iter::zip(&self.0, weights).map(|(v, w)| v * w).sum()
    }
}

#[cfg(test)]
mod tests {
    use stackris_engine::{Move, PieceCatalog, PieceKind};

    use super::*;

    #[test]
    fn test_extraction_on_preview_reports_placement_clears() {
        let board = Board::from_ascii(
            PieceCatalog::standard(),
            "
            #########.
            ",
        );
        let mut preview = board.preview();
        preview
            .try_place(
                PieceKind::I,
                Move {
                    orientation: 0,
                    slot: 9,
                },
            )
            .unwrap();

        let features = HeuristicVector::from_board(&preview);
        assert_eq!(features.values()[feature::ROWS_CLEARED], 1.0);
        assert_eq!(features.values()[feature::AGGREGATE_HEIGHT], 3.0);
        assert_eq!(features.values()[feature::LOST], 0.0);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let board = Board::from_ascii(
            PieceCatalog::standard(),
            "
            #.#.......
            ###.....#.
            ",
        );
        assert_eq!(
            HeuristicVector::from_board(&board),
            HeuristicVector::from_board(&board)
        );
    }

    #[test]
    fn test_weighted_score_is_positional() {
        let mut values = HeuristicVector([0.0; NUM_HEURISTICS]);
        values.0[feature::HOLES] = 2.0;
        let mut weights: WeightVector = [0.0; NUM_HEURISTICS];
        weights[feature::HOLES] = 1.5;
        assert!((values.weighted_score(&weights) - 3.0).abs() < f64::EPSILON);

        weights[feature::BUMPINESS] = 100.0;
        assert!((values.weighted_score(&weights) - 3.0).abs() < f64::EPSILON);
    }
}
