use super::Trainer;
use crate::{
    Result,
    arch::{ModelParameters, loss::Mse},
    initialization::ParamGen,
    optimization::GradientDescent,
    specs::{LossFnSpec, TrainingSpec},
};

/// Builds `Trainer`s given a specification.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Trainer` following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification for the trainer.
    ///
    /// # Errors
    /// `InvalidParameter` if the spec holds a value training cannot start with.
    pub fn build(&self, spec: &TrainingSpec) -> Result<Trainer<GradientDescent, Mse>> {
        self.resolve_optimizer(spec)
    }

    /// Resolves the initial parameters of a spec, sampling the missing ones.
    ///
    /// # Arguments
    /// * `spec` - The specification for the trainer.
    pub fn initial_params(&self, spec: &TrainingSpec) -> ModelParameters {
        ParamGen::seeded(spec.seed).params(spec.initial_weight, spec.initial_bias)
    }

    fn resolve_optimizer(&self, spec: &TrainingSpec) -> Result<Trainer<GradientDescent, Mse>> {
        let optimizer = GradientDescent::new(spec.learning_rate)?;
        self.resolve_loss(spec, optimizer)
    }

    fn resolve_loss(
        &self,
        spec: &TrainingSpec,
        optimizer: GradientDescent,
    ) -> Result<Trainer<GradientDescent, Mse>> {
        match spec.loss {
            LossFnSpec::Mse => {
                let loss = Mse::new();
                self.terminate_build(spec, optimizer, loss)
            }
        }
    }

    fn terminate_build(
        &self,
        spec: &TrainingSpec,
        optimizer: GradientDescent,
        loss: Mse,
    ) -> Result<Trainer<GradientDescent, Mse>> {
        Trainer::new(optimizer, loss, spec.max_iterations)?.with_report_every(spec.report_every)
    }
}
