//! Population checkpoint persistence.
//!
//! The checkpoint format is one line per individual: exactly
//! [`NUM_HEURISTICS`] whitespace-separated decimal weights in fixed feature
//! order. Fitness is not persisted; restored individuals start unevaluated
//! and are re-played on the next generation.

use std::{
    fs, io, iter,
    path::{Path, PathBuf},
};

use stackris_evaluator::heuristic::NUM_HEURISTICS;

use crate::{individual::Individual, population::Population};

/// Saves and restores populations between training runs.
pub trait CheckpointStore {
    fn save(&self, population: &Population) -> Result<(), CheckpointError>;
    fn load(&self) -> Result<Population, CheckpointError>;
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CheckpointError {
    #[display("checkpoint I/O failed: {_0}")]
    Io(io::Error),
    #[display("{_0}")]
    Format(CheckpointFormatError),
}

/// A checkpoint line that does not match the schema.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("checkpoint line {line}: {kind}")]
pub struct CheckpointFormatError {
    /// 1-based line number of the offending line.
    pub line: usize,
    pub kind: FormatErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum FormatErrorKind {
    #[display("expected {NUM_HEURISTICS} weights, found {_0}")]
    WrongTokenCount(usize),
    #[display("invalid weight token {_0:?}")]
    BadToken(String),
}

/// Renders a population in checkpoint format.
#[must_use]
pub fn encode(population: &Population) -> String {
    let mut text = String::new();
    for individual in population.individuals() {
        let line = individual
            .weights()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        text.push_str(&line);
        text.push('\n');
    }
    text
}

/// Parses checkpoint text into a population of unevaluated individuals.
///
/// Blank lines are skipped. Any malformed line fails the whole load; nothing
/// is partially populated.
pub fn decode(text: &str) -> Result<Population, CheckpointFormatError> {
    let mut individuals = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != NUM_HEURISTICS {
            return Err(CheckpointFormatError {
                line: index + 1,
                kind: FormatErrorKind::WrongTokenCount(tokens.len()),
            });
        }
        let mut weights = [0.0; NUM_HEURISTICS];
        for (weight, token) in iter::zip(&mut weights, tokens) {
            *weight = token.parse().map_err(|_| CheckpointFormatError {
                line: index + 1,
                kind: FormatErrorKind::BadToken(token.to_owned()),
            })?;
        }
        individuals.push(Individual::from_weights(weights));
    }
    Ok(Population::from_individuals(individuals))
}

/// File-backed checkpoint store.
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn save(&self, population: &Population) -> Result<(), CheckpointError> {
        fs::write(&self.path, encode(population))?;
        Ok(())
    }

    fn load(&self) -> Result<Population, CheckpointError> {
        let text = fs::read_to_string(&self.path)?;
        Ok(decode(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::individual::Fitness;

    #[test]
    fn test_roundtrip_preserves_weights() {
        let mut rng = Pcg64Mcg::seed_from_u64(31);
        let population = Population::random(5, &mut rng);
        let restored = decode(&encode(&population)).unwrap();

        assert_eq!(restored.len(), population.len());
        for (restored, original) in restored.individuals().iter().zip(population.individuals()) {
            assert_eq!(restored.weights(), original.weights());
            assert_eq!(restored.fitness(), Fitness::Unevaluated);
        }
    }

    #[test]
    fn test_decode_known_line() {
        let population = decode("1.5 -2 0 3.25 4 5000\n").unwrap();
        assert_eq!(population.len(), 1);
        assert_eq!(
            population.get(0).weights(),
            &[1.5, -2.0, 0.0, 3.25, 4.0, 5000.0]
        );
    }

    #[test]
    fn test_decode_skips_blank_lines() {
        let text = "\n1 2 3 4 5 6\n\n7 8 9 10 11 12\n";
        let population = decode(text).unwrap();
        assert_eq!(population.len(), 2);
    }

    #[test]
    fn test_decode_rejects_wrong_token_count() {
        let err = decode("1 2 3 4 5 6\n1 2 3\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, FormatErrorKind::WrongTokenCount(3));
    }

    #[test]
    fn test_decode_rejects_non_numeric_token() {
        let err = decode("1 2 three 4 5 6\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.kind, FormatErrorKind::BadToken("three".to_owned()));
    }

    #[test]
    fn test_empty_text_is_an_empty_population() {
        assert!(decode("").unwrap().is_empty());
    }
}
