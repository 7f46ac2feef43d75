use serde::{Deserialize, Serialize};

use crate::arch::{ModelParameters, predict};

/// A point-in-time observation of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingSnapshot {
    pub weight: f64,
    pub bias: f64,
    /// The cost at `weight` and `bias`, passed through as is even when not finite.
    pub cost: f64,
    pub iteration: usize,
}

impl TrainingSnapshot {
    pub fn params(&self) -> ModelParameters {
        ModelParameters::new(self.weight, self.bias)
    }

    /// Returns the endpoints of the fitted line over a feature range.
    ///
    /// # Arguments
    /// * `range` - The `(min, max)` features to evaluate, usually `Dataset::feature_range`.
    pub fn fit_line(&self, (min, max): (f64, f64)) -> [(f64, f64); 2] {
        [
            (min, predict(min, self.weight, self.bias)),
            (max, predict(max, self.weight, self.bias)),
        ]
    }
}

/// The state of a training run once every iteration has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub weight: f64,
    pub bias: f64,
    pub iteration: usize,
}

impl TrainingResult {
    pub fn params(&self) -> ModelParameters {
        ModelParameters::new(self.weight, self.bias)
    }
}
