use super::Optimizer;
use crate::{
    Result,
    arch::{ModelParameters, loss::Gradient},
    error::RegressionErr,
};

/// The learning rate used when none is configured.
pub const DEFAULT_LEARNING_RATE: f64 = 1e-6;

/// Gradient descent optimization algorithm.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    ///
    /// # Errors
    /// `InvalidParameter` if the learning rate is not a positive finite number.
    pub fn new(learning_rate: f64) -> Result<Self> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(RegressionErr::invalid(
                "learning_rate",
                format!("must be a positive finite number, got {learning_rate}"),
            ));
        }

        Ok(Self { learning_rate })
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }
}

impl Optimizer for GradientDescent {
    /// Updates the parameters according to the algorithm's learning rule, that is, making a step in
    /// the opposite direction of the gradient, with a length of `learning_rate`.
    ///
    /// # Arguments
    /// * `params` - The parameters that are going to be modified.
    /// * `grad` - The gradient used for taking the step.
    fn update_params(&mut self, params: &mut ModelParameters, grad: &Gradient) {
        let lr = self.learning_rate;

        params.weight -= lr * grad.d_weight;
        params.bias -= lr * grad.d_bias;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_against_the_gradient() {
        let mut gd = GradientDescent::new(0.5).unwrap();
        let mut params = ModelParameters::new(1.0, 1.0);
        let grad = Gradient {
            d_weight: 2.0,
            d_bias: -4.0,
        };

        gd.update_params(&mut params, &grad);
        assert_eq!(params, ModelParameters::new(0.0, 3.0));
    }

    #[test]
    fn rejects_non_positive_learning_rates() {
        for lr in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                GradientDescent::new(lr),
                Err(RegressionErr::InvalidParameter {
                    name: "learning_rate",
                    ..
                })
            ));
        }
    }

    #[test]
    fn default_uses_a_small_step() {
        assert_eq!(
            GradientDescent::default().learning_rate(),
            DEFAULT_LEARNING_RATE
        );
    }
}
