use std::{env, fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    Result, error::RegressionErr, optimization::DEFAULT_LEARNING_RATE,
    training::DEFAULT_REPORT_EVERY,
};

/// Environment variable that overrides the configured learning rate.
pub const LEARNING_RATE_ENV: &str = "DESCENT_LEARNING_RATE";

/// Where to read the dataset from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatasetSpec {
    /// A headered csv file.
    pub path: PathBuf,
    /// The header of the column holding the feature.
    pub feature: String,
    /// The header of the column holding the target.
    pub target: String,
}

/// The loss function to fit with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossFnSpec {
    #[default]
    Mse,
}

/// The specification of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrainingSpec {
    pub dataset: DatasetSpec,
    pub max_iterations: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub loss: LossFnSpec,
    #[serde(default)]
    pub initial_weight: Option<f64>,
    #[serde(default)]
    pub initial_bias: Option<f64>,
    /// Seeds the sampling of missing initial parameters.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_report_every")]
    pub report_every: usize,
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

fn default_report_every() -> usize {
    DEFAULT_REPORT_EVERY.get()
}

/// Parses the value of `DESCENT_LEARNING_RATE`, if any.
fn learning_rate_override(value: Option<String>) -> Result<Option<f64>> {
    let Some(value) = value else {
        return Ok(None);
    };

    value.trim().parse().map(Some).map_err(|e| {
        RegressionErr::invalid("learning_rate", format!("{LEARNING_RATE_ENV}='{value}': {e}"))
    })
}

impl TrainingSpec {
    /// Parses a spec from json text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a json spec file.
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Applies the overrides found in the process environment.
    ///
    /// # Errors
    /// `InvalidParameter` if `DESCENT_LEARNING_RATE` is set but not a number.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(lr) = learning_rate_override(env::var(LEARNING_RATE_ENV).ok())? {
            self.learning_rate = lr;
        }

        Ok(())
    }
}
