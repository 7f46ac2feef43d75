use super::{Gradient, LossFn};
use crate::{
    Result,
    arch::{ModelParameters, predict},
    dataset::Dataset,
    error::RegressionErr,
};

/// Halved mean squared error loss function.
///
/// Sums run over the valid points only, while averages divide by the total
/// amount of points in the dataset. Invalid points therefore pull both the
/// cost and the gradient towards zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, dataset: &Dataset, params: &ModelParameters) -> Result<f64> {
        cost(dataset, params.weight, params.bias)
    }

    fn loss_prime(&self, dataset: &Dataset, params: &ModelParameters) -> Result<Gradient> {
        gradient(dataset, params.weight, params.bias)
    }
}

/// Returns the total point count to average over.
///
/// # Errors
/// `EmptyDataset` if there is nothing to fit, which would otherwise end up as NaN.
fn divisor(dataset: &Dataset) -> Result<f64> {
    if dataset.valid().next().is_none() {
        return Err(RegressionErr::EmptyDataset);
    }

    Ok(dataset.len() as f64)
}

/// Computes `sum((predict(x) - y)^2) / (2 * n)` over the valid points.
///
/// # Arguments
/// * `dataset` - The points to measure against.
/// * `weight` - The model's weight.
/// * `bias` - The model's bias.
pub fn cost(dataset: &Dataset, weight: f64, bias: f64) -> Result<f64> {
    let n = divisor(dataset)?;

    let sum: f64 = dataset
        .valid()
        .map(|p| (predict(p.feature, weight, bias) - p.target).powi(2))
        .sum();

    Ok(sum / (2.0 * n))
}

/// Computes the partial derivatives of `cost` with respect to the weight and the bias.
///
/// # Arguments
/// * `dataset` - The points to measure against.
/// * `weight` - The model's weight.
/// * `bias` - The model's bias.
pub fn gradient(dataset: &Dataset, weight: f64, bias: f64) -> Result<Gradient> {
    let n = divisor(dataset)?;
    let mut grad = Gradient::default();

    for p in dataset.valid() {
        let error = predict(p.feature, weight, bias) - p.target;
        grad.d_weight += error * p.feature;
        grad.d_bias += error;
    }

    grad.d_weight /= n;
    grad.d_bias /= n;
    Ok(grad)
}
