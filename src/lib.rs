//! Fits `target ≈ weight * feature + bias` to a dataset with batch gradient
//! descent, reporting progress as a lazy sequence of snapshots.

pub mod arch;
pub mod dataset;
pub mod error;
pub mod initialization;
pub mod loader;
pub mod optimization;
pub mod specs;
pub mod training;

pub use arch::{ModelParameters, predict};
pub use dataset::{DataPoint, Dataset};
pub use error::{RegressionErr, Result};
pub use training::{
    Trainer, TrainerBuilder, Training, TrainingEvent, TrainingResult, TrainingSnapshot, train,
};
