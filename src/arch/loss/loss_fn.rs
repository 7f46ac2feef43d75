use crate::{Result, arch::ModelParameters, dataset::Dataset};

/// Partial derivatives of a loss with respect to the model parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gradient {
    pub d_weight: f64,
    pub d_bias: f64,
}

pub trait LossFn {
    /// Measures how far the model is from the dataset's targets.
    fn loss(&self, dataset: &Dataset, params: &ModelParameters) -> Result<f64>;

    /// Computes the gradient of `loss` at `params`.
    fn loss_prime(&self, dataset: &Dataset, params: &ModelParameters) -> Result<Gradient>;
}
