use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PieceKind {
    /// O-piece (2×2 square).
    O = 0,
    /// I-piece.
    I = 1,
    /// L-piece.
    L = 2,
    /// J-piece.
    J = 3,
    /// T-piece.
    T = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::O,
            1 => PieceKind::I,
            2 => PieceKind::L,
            3 => PieceKind::J,
            4 => PieceKind::T,
            5 => PieceKind::S,
            _ => PieceKind::Z,
        }
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    /// All piece kinds in index order.
    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    const fn as_usize(self) -> usize {
        self as usize
    }
}

/// Widest piece orientation (the horizontal I-piece).
pub const MAX_PIECE_WIDTH: usize = 4;

/// Geometry of one orientation of a piece.
///
/// A piece orientation is described by its bounding width and height plus two
/// per-column contact profiles:
///
/// - `bottom[c]` - Row offset of the lowest occupied cell in column `c`
/// - `top[c]` - Row offset just above the highest occupied cell in column `c`
///
/// Column `c` of the orientation therefore occupies the half-open row range
/// `bottom[c]..top[c]` relative to the landing height. Every orientation has
/// at least one column with `bottom == 0` (a piece always rests on its own
/// lowest cell).
#[derive(Debug, Clone, Copy)]
pub struct OrientationGeometry {
    width: usize,
    height: usize,
    bottom: [usize; MAX_PIECE_WIDTH],
    top: [usize; MAX_PIECE_WIDTH],
}

impl OrientationGeometry {
    const fn new(height: usize, bottom: &[usize], top: &[usize]) -> Self {
        assert!(bottom.len() == top.len());
        assert!(!bottom.is_empty() && bottom.len() <= MAX_PIECE_WIDTH);
        let width = bottom.len();
        let mut b = [0; MAX_PIECE_WIDTH];
        let mut t = [0; MAX_PIECE_WIDTH];
        let mut c = 0;
        while c < width {
            b[c] = bottom[c];
            t[c] = top[c];
            c += 1;
        }
        Self {
            width,
            height,
            bottom: b,
            top: t,
        }
    }

    /// Number of columns this orientation spans.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows this orientation spans.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Per-column bottom contact profile.
    #[must_use]
    pub fn bottom(&self) -> &[usize] {
        &self.bottom[..self.width]
    }

    /// Per-column top contact profile.
    #[must_use]
    pub fn top(&self) -> &[usize] {
        &self.top[..self.width]
    }
}

/// Immutable piece geometry tables.
///
/// Maps a piece kind and orientation index to the orientation's geometry.
/// The catalog is a value passed to [`Board`](crate::Board) at construction so
/// tests can substitute alternative piece sets; production code uses the
/// process-wide [`PieceCatalog::standard`] table.
///
/// Orientation counts for the standard catalog are `{1, 2, 4, 4, 4, 2, 2}`
/// for O, I, L, J, T, S, Z respectively (symmetric orientations deduplicated).
#[derive(Debug)]
pub struct PieceCatalog {
    orientations: [&'static [OrientationGeometry]; PieceKind::LEN],
}

impl PieceCatalog {
    /// Creates a catalog from per-kind orientation tables, indexed in
    /// [`PieceKind`] order.
    #[must_use]
    pub const fn new(orientations: [&'static [OrientationGeometry]; PieceKind::LEN]) -> Self {
        Self { orientations }
    }

    /// Returns the standard 7-piece catalog.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Number of orientations for the given piece kind.
    #[must_use]
    pub fn orientation_count(&self, kind: PieceKind) -> usize {
        self.orientations[kind.as_usize()].len()
    }

    /// Geometry of one orientation of the given piece kind.
    ///
    /// # Panics
    ///
    /// Panics if `orientation` is out of range for the kind.
    #[must_use]
    pub fn orientation(&self, kind: PieceKind, orientation: usize) -> &OrientationGeometry {
        &self.orientations[kind.as_usize()][orientation]
    }
}

const fn g(height: usize, bottom: &[usize], top: &[usize]) -> OrientationGeometry {
    OrientationGeometry::new(height, bottom, top)
}

static STANDARD: PieceCatalog = PieceCatalog::new([
    // O-piece
    &[g(2, &[0, 0], &[2, 2])],
    // I-piece
    &[g(4, &[0], &[4]), g(1, &[0, 0, 0, 0], &[1, 1, 1, 1])],
    // L-piece
    &[
        g(3, &[0, 0], &[3, 1]),
        g(2, &[0, 1, 1], &[2, 2, 2]),
        g(3, &[2, 0], &[3, 3]),
        g(2, &[0, 0, 0], &[1, 1, 2]),
    ],
    // J-piece
    &[
        g(3, &[0, 0], &[1, 3]),
        g(2, &[0, 0, 0], &[2, 1, 1]),
        g(3, &[0, 2], &[3, 3]),
        g(2, &[1, 1, 0], &[2, 2, 2]),
    ],
    // T-piece
    &[
        g(3, &[0, 1], &[3, 2]),
        g(2, &[1, 0, 1], &[2, 2, 2]),
        g(3, &[1, 0], &[2, 3]),
        g(2, &[0, 0, 0], &[1, 2, 1]),
    ],
    // S-piece
    &[g(2, &[0, 0, 1], &[1, 2, 2]), g(3, &[1, 0], &[3, 2])],
    // Z-piece
    &[g(2, &[1, 0, 0], &[2, 2, 1]), g(3, &[0, 1], &[2, 3])],
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_orientation_counts() {
        let catalog = PieceCatalog::standard();
        let expected = [1, 2, 4, 4, 4, 2, 2];
        for (kind, count) in PieceKind::ALL.into_iter().zip(expected) {
            assert_eq!(
                catalog.orientation_count(kind),
                count,
                "{kind:?}: orientation count"
            );
        }
    }

    #[test]
    fn test_every_orientation_has_four_cells() {
        // Each orientation's column ranges must cover exactly 4 cells.
        let catalog = PieceCatalog::standard();
        for kind in PieceKind::ALL {
            for orientation in 0..catalog.orientation_count(kind) {
                let geom = catalog.orientation(kind, orientation);
                let cells: usize = geom
                    .bottom()
                    .iter()
                    .zip(geom.top())
                    .map(|(b, t)| t - b)
                    .sum();
                assert_eq!(cells, 4, "{kind:?}/{orientation}: cell count");
            }
        }
    }

    #[test]
    fn test_profiles_fit_bounding_box() {
        let catalog = PieceCatalog::standard();
        for kind in PieceKind::ALL {
            for orientation in 0..catalog.orientation_count(kind) {
                let geom = catalog.orientation(kind, orientation);
                assert!(geom.width() >= 1 && geom.width() <= MAX_PIECE_WIDTH);
                let mut has_grounded_column = false;
                for (b, t) in geom.bottom().iter().zip(geom.top()) {
                    assert!(b < t, "{kind:?}/{orientation}: empty column range");
                    assert!(*t <= geom.height(), "{kind:?}/{orientation}: top overflow");
                    has_grounded_column |= *b == 0;
                }
                assert!(
                    has_grounded_column,
                    "{kind:?}/{orientation}: no column touches the bottom"
                );
            }
        }
    }

    #[test]
    fn test_uniform_piece_draws_cover_all_kinds() {
        use rand::SeedableRng as _;
        use rand_pcg::Pcg64Mcg;

        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..1000 {
            let kind: PieceKind = rng.random();
            seen[kind as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
