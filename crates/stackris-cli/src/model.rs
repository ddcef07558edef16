use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stackris_evaluator::heuristic::WeightVector;

use crate::util;

/// Exported result of a training run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainedModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    /// Rows cleared by the best individual during its fitness playout.
    pub fitness: u64,
    /// Heuristic weights in fixed feature order.
    pub weights: WeightVector,
}

impl TrainedModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("trained model", path)
    }
}
