use std::iter;

use arrayvec::ArrayVec;

use crate::{
    TopOutError,
    catalog::{PieceCatalog, PieceKind},
};

/// Number of board rows. Row 0 is the bottom of the stack.
pub const ROWS: usize = 21;
/// Number of board columns.
pub const COLS: usize = 10;

/// Upper bound on the number of legal moves for a single piece.
///
/// Four orientations of a width-1 piece would give `4 * COLS` slots; every
/// real piece has fewer.
pub const MAX_MOVES: usize = 4 * COLS;

/// A legal placement of the current piece: an orientation index and the
/// leftmost column (slot) the piece is dropped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub orientation: usize,
    pub slot: usize,
}

/// The playing field.
///
/// Each cell stores the turn index that placed it (0 means empty), so the
/// field doubles as a placement history. `top[c]` tracks the height of the
/// tallest occupied cell in column `c` plus one; placements and line clears
/// keep it consistent.
///
/// Once a placement tops out the board the `lost` flag is set and the board is
/// frozen: every further [`Board::try_place`] is rejected without mutation.
#[derive(Debug, Clone)]
pub struct Board {
    catalog: &'static PieceCatalog,
    field: [[u32; COLS]; ROWS],
    top: [usize; COLS],
    turn: u32,
    rows_cleared: u32,
    lost: bool,
}

impl Board {
    /// Creates an empty board backed by the given piece catalog.
    #[must_use]
    pub fn new(catalog: &'static PieceCatalog) -> Self {
        Self {
            catalog,
            field: [[0; COLS]; ROWS],
            top: [0; COLS],
            turn: 0,
            rows_cleared: 0,
            lost: false,
        }
    }

    /// Returns the catalog this board was constructed with.
    #[must_use]
    pub fn catalog(&self) -> &'static PieceCatalog {
        self.catalog
    }

    /// Returns the number of placements applied so far.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    /// Returns the cumulative number of rows cleared.
    #[must_use]
    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    /// Returns the per-column top markers.
    #[must_use]
    pub fn top(&self) -> &[usize; COLS] {
        &self.top
    }

    /// Returns the turn tag of a cell, 0 if empty.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> u32 {
        self.field[row][col]
    }

    /// Returns whether a cell is occupied.
    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.field[row][col] != 0
    }

    /// Returns whether the board has reached terminal loss.
    #[must_use]
    pub fn has_lost(&self) -> bool {
        self.lost
    }

    /// Enumerates every legal move for the given piece kind.
    ///
    /// One move per (orientation, slot) pair where the orientation's width
    /// fits within the board. Finite, deterministic, and never empty for the
    /// standard catalog on a 10-wide board.
    #[must_use]
    pub fn legal_moves(&self, piece: PieceKind) -> ArrayVec<Move, MAX_MOVES> {
        let mut moves = ArrayVec::new();
        for orientation in 0..self.catalog.orientation_count(piece) {
            let width = self.catalog.orientation(piece, orientation).width();
            for slot in 0..=COLS - width {
                moves.push(Move { orientation, slot });
            }
        }
        moves
    }

    /// Drops the piece into the given slot and clears any completed rows.
    ///
    /// The landing height is the highest contact point across the columns the
    /// piece covers. If the piece would extend past the top of the board the
    /// board is marked lost, nothing else is mutated, and the placement is
    /// rejected. On success, returns the number of rows cleared by this
    /// placement.
    #[expect(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn try_place(&mut self, piece: PieceKind, mv: Move) -> Result<u32, TopOutError> {
        if self.lost {
            return Err(TopOutError);
        }

        let geom = self.catalog.orientation(piece, mv.orientation);
        let bottom = geom.bottom();
        let top_profile = geom.top();

        // Highest contact point across covered columns. Individual terms can
        // go negative when a column's bottom profile overhangs an empty
        // column, but at least one column has bottom == 0, so the max is >= 0.
        let mut height = isize::MIN;
        for (c, b) in bottom.iter().enumerate() {
            let contact = self.top[mv.slot + c] as isize - *b as isize;
            height = height.max(contact);
        }
        let height = height as usize;

        if height + geom.height() >= ROWS {
            self.lost = true;
            return Err(TopOutError);
        }

        self.turn += 1;
        let tag = self.turn;
        for (c, (b, t)) in iter::zip(bottom, top_profile).enumerate() {
            for row in height + b..height + t {
                self.field[row][mv.slot + c] = tag;
            }
        }
        for (c, t) in top_profile.iter().enumerate() {
            self.top[mv.slot + c] = height + t;
        }

        let mut cleared = 0;
        // Scan affected rows from the top of the placement downward. Rows
        // shifted down from above were already verified non-full, so each row
        // index is examined exactly once.
        for row in (height..height + geom.height()).rev() {
            let full = (0..COLS).all(|col| self.field[row][col] != 0);
            if !full {
                continue;
            }
            cleared += 1;
            self.rows_cleared += 1;
            for col in 0..COLS {
                // A full row implies every column's top is above it.
                for i in row..self.top[col] {
                    self.field[i][col] = self.field[i + 1][col];
                }
                self.top[col] -= 1;
                while self.top[col] >= 1 && self.field[self.top[col] - 1][col] == 0 {
                    self.top[col] -= 1;
                }
            }
        }

        Ok(cleared)
    }

    /// Returns a disposable copy for move simulation.
    ///
    /// The copy shares the field, tops, and turn number of this board but has
    /// a zeroed rows-cleared counter, so after a simulated placement its
    /// [`Board::rows_cleared`] reads the rows cleared by that placement alone.
    #[must_use]
    pub fn preview(&self) -> Self {
        let mut copy = self.clone();
        copy.rows_cleared = 0;
        copy
    }

    /// Creates a `Board` from ASCII art for testing.
    /// '#' represents an occupied cell, '.' an empty cell.
    /// Supply at most [`ROWS`] lines of exactly [`COLS`] cells, ordered top to
    /// bottom; rows above the supplied lines are empty.
    #[must_use]
    pub fn from_ascii(catalog: &'static PieceCatalog, art: &str) -> Self {
        let mut board = Self::new(catalog);
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(lines.len() <= ROWS, "too many rows: {}", lines.len());

        for (y, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                COLS,
                "each row must have exactly {COLS} cells, got {} at row {y}",
                chars.len()
            );
            let row = lines.len() - 1 - y;
            for (col, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    board.field[row][col] = 1;
                }
            }
        }

        for col in 0..COLS {
            board.top[col] = (0..ROWS)
                .rev()
                .find(|row| board.field[*row][col] != 0)
                .map_or(0, |row| row + 1);
        }
        board
    }
}
