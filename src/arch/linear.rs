use serde::{Deserialize, Serialize};

/// Evaluates the linear model `feature * weight + bias`.
#[inline]
pub fn predict(feature: f64, weight: f64, bias: f64) -> f64 {
    feature * weight + bias
}

/// The two scalars being optimized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub weight: f64,
    pub bias: f64,
}

impl ModelParameters {
    pub fn new(weight: f64, bias: f64) -> Self {
        Self { weight, bias }
    }

    /// Evaluates the model with these parameters.
    #[inline]
    pub fn predict(&self, feature: f64) -> f64 {
        predict(feature, self.weight, self.bias)
    }
}
