use std::cell::OnceCell;

use stackris_engine::{Board, COLS};

/// Lazy-evaluated board measurements.
///
/// Each metric is a pure function of the board snapshot, computed on first
/// access and cached. Extracting the full heuristic vector touches every
/// metric, but callers probing a single measurement pay only for that one.
#[derive(Debug)]
pub struct BoardMetrics<'a> {
    board: &'a Board,
    aggregate_height: OnceCell<u32>,
    occupied_cells: OnceCell<u32>,
    bumpiness: OnceCell<u32>,
    bad_gaps: OnceCell<u32>,
}

impl<'a> BoardMetrics<'a> {
    #[must_use]
    pub fn from_board(board: &'a Board) -> Self {
        Self {
            board,
            aggregate_height: OnceCell::new(),
            occupied_cells: OnceCell::new(),
            bumpiness: OnceCell::new(),
            bad_gaps: OnceCell::new(),
        }
    }

    /// Sum of the per-column top markers.
    #[must_use]
    pub fn aggregate_height(&self) -> u32 {
        *self.aggregate_height.get_or_init(|| {
            self.board
                .top()
                .iter()
                .map(|t| u32::try_from(*t).unwrap())
                .sum()
        })
    }

    /// Number of occupied cells on the board.
    #[must_use]
    pub fn occupied_cells(&self) -> u32 {
        *self.occupied_cells.get_or_init(|| {
            let mut count = 0;
            for col in 0..COLS {
                for row in 0..self.board.top()[col] {
                    if self.board.is_occupied(row, col) {
                        count += 1;
                    }
                }
            }
            count
        })
    }

    /// Empty cells strictly under a column top.
    ///
    /// Every cell below `top[c]` is either occupied or a hole, so the hole
    /// count is the aggregate height minus the occupied cell count.
    #[must_use]
    pub fn holes(&self) -> u32 {
        self.aggregate_height() - self.occupied_cells()
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> u32 {
        *self.bumpiness.get_or_init(|| {
            self.board
                .top()
                .windows(2)
                .map(|w| u32::try_from(w[0].abs_diff(w[1])).unwrap())
                .sum()
        })
    }

    /// Penalty for narrow well-like gaps only a vertical I-piece could fill.
    ///
    /// An interior column counts when both neighbors exceed it by at least 2;
    /// the smaller of the two differences is added. A border column counts
    /// when its single neighbor exceeds it by at least 2.
    #[must_use]
    pub fn bad_gaps(&self) -> u32 {
        *self.bad_gaps.get_or_init(|| {
            let top = self.board.top();
            let mut penalty = 0usize;

            let left_rise = top[1].saturating_sub(top[0]);
            if left_rise >= 2 {
                penalty += left_rise;
            }
            let right_rise = top[COLS - 2].saturating_sub(top[COLS - 1]);
            if right_rise >= 2 {
                penalty += right_rise;
            }
            for c in 1..COLS - 1 {
                let from_left = top[c - 1].saturating_sub(top[c]);
                let from_right = top[c + 1].saturating_sub(top[c]);
                if from_left >= 2 && from_right >= 2 {
                    penalty += from_left.min(from_right);
                }
            }
            u32::try_from(penalty).unwrap()
        })
    }
}
