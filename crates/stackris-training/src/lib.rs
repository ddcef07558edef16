//! Evolving heuristic weights with a genetic algorithm.
//!
//! This crate optimizes the six-gene weight vector that
//! `stackris-evaluator`'s move selector scores placements with. Fitness is
//! rows cleared in full game playouts, so the optimizer needs no knowledge of
//! the heuristics themselves.
//!
//! # How Training Works
//!
//! 1. **Population** - Start from random weight vectors (or a checkpoint)
//! 2. **Evaluation** - Each individual plays full games in parallel; fitness
//!    is the rows cleared
//! 3. **Selection** - Tournament selection picks breeding parents
//! 4. **Reproduction** - Uniform crossover and per-gene mutation produce the
//!    citizens of the next generation, plus fresh random foreigners
//! 5. **Elitism** - The top individuals carry over with their cached fitness
//! 6. **Repeat** - Until the fittest reaches the convergence target or the
//!    generation cap
//!
//! # Architecture
//!
//! ```text
//! EvolutionEngine (evaluate / report / checkpoint / evolve loop)
//!     ↓ drives
//! Population + PopulationEvolver (selection, crossover, mutation, elitism)
//!     ↓ evaluates via
//! Playout (stackris-evaluator, parallel scoped tasks)
//! ```
//!
//! All randomness flows through injected [`rand::Rng`] values; seeding a
//! `rand_pcg::Pcg64Mcg` makes an entire run reproducible. Checkpoints persist
//! only weights ([`checkpoint`]), so restored populations are re-evaluated.

pub mod checkpoint;
pub mod engine;
pub mod genetic;
pub mod individual;
pub mod population;
pub mod weights;
