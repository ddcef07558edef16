//! Heuristic evaluation for board states and move selection.
//!
//! This crate implements a three-level evaluation architecture on top of
//! `stackris-engine`:
//!
//! 1. **Board metrics** ([`board_metrics`]) - Lazy-evaluated board measurements
//!    (aggregate height, holes, bumpiness, bad gaps) over a board snapshot.
//!
//! 2. **Move selection** ([`move_selector`]) - Scores every legal move of the
//!    current piece by simulating it on a disposable board copy and taking the
//!    dot product of the resulting [`heuristic::HeuristicVector`] with a bound
//!    weight vector; the minimum-score move wins.
//!
//! 3. **Playout** ([`playout`]) - Plays complete games with a move selector
//!    against uniform-random piece draws and reports rows cleared, which the
//!    training crate uses as the fitness function.
//!
//! # Architecture
//!
//! ```text
//! Playout (rows cleared = fitness for training)
//!     ↓ uses
//! Move Selection (pick the minimum weighted score)
//!     ↓ uses
//! Board Metrics + Heuristic Vector (measure a candidate board)
//! ```
//!
//! # Design: Linear Evaluation Model
//!
//! A move's score is a weighted sum of six fixed-order features. Lower is
//! better: the training process assigns positive coefficients to features it
//! wants to penalize (height, holes, bumpiness, bad gaps, loss) and a negative
//! coefficient to rows cleared. The evaluator itself is sign-agnostic; the
//! optimizer decides the signs.

pub mod board_metrics;
pub mod heuristic;
pub mod move_selector;
pub mod playout;
