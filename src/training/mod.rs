mod background;
mod builder;
mod snapshot;
mod trainer;

pub use background::{SnapshotReceiver, TrainingEvent, spawn};
pub use builder::TrainerBuilder;
pub use snapshot::{TrainingResult, TrainingSnapshot};
pub use trainer::{DEFAULT_REPORT_EVERY, Trainer, Training};

use crate::{
    Result,
    arch::loss::Mse,
    dataset::Dataset,
    initialization::ParamGen,
    optimization::GradientDescent,
};

/// Fits a line to `dataset` with plain gradient descent on the halved mean squared error.
///
/// Missing initial parameters are sampled from `[0, 1)` with OS entropy; pass
/// both to get a reproducible run.
///
/// # Arguments
/// * `dataset` - The points to fit.
/// * `max_iterations` - The amount of update steps.
/// * `initial_weight` - The starting weight, sampled if `None`.
/// * `initial_bias` - The starting bias, sampled if `None`.
/// * `learning_rate` - The step size, see `DEFAULT_LEARNING_RATE`.
///
/// # Errors
/// `InvalidParameter` if `max_iterations` is zero or `learning_rate` is not positive.
pub fn train(
    dataset: &Dataset,
    max_iterations: usize,
    initial_weight: Option<f64>,
    initial_bias: Option<f64>,
    learning_rate: f64,
) -> Result<Training<'_, GradientDescent, Mse>> {
    let optimizer = GradientDescent::new(learning_rate)?;
    let trainer = Trainer::new(optimizer, Mse::new(), max_iterations)?;
    let params = ParamGen::seeded(None).params(initial_weight, initial_bias);

    Ok(trainer.train(dataset, params))
}
