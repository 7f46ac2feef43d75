use rand::{Rng, SeedableRng, distr::StandardUniform, rngs::StdRng};
use rand_distr::{Distribution, Uniform};

use crate::{Result, arch::ModelParameters, error::RegressionErr};

/// A generator of initial model parameters that follows a certain probabilistic distribution.
///
/// Explicitly given values always win over sampled ones, so a caller that
/// needs determinism can either fix both values or fix the seed.
pub struct ParamGen<R: Rng, D: Distribution<f64>> {
    rng: R,
    distribution: D,
}

impl<R: Rng, D: Distribution<f64>> ParamGen<R, D> {
    /// Creates a new `ParamGen`.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `distribution` - The distribution to sample the missing parameters from.
    pub fn new(rng: R, distribution: D) -> Self {
        Self { rng, distribution }
    }

    /// Resolves the initial parameters, sampling the ones that were not given.
    ///
    /// The weight is drawn before the bias.
    ///
    /// # Arguments
    /// * `weight` - The initial weight, if fixed by the caller.
    /// * `bias` - The initial bias, if fixed by the caller.
    pub fn params(&mut self, weight: Option<f64>, bias: Option<f64>) -> ModelParameters {
        let weight = weight.unwrap_or_else(|| self.distribution.sample(&mut self.rng));
        let bias = bias.unwrap_or_else(|| self.distribution.sample(&mut self.rng));
        ModelParameters::new(weight, bias)
    }
}

impl<R: Rng> ParamGen<R, StandardUniform> {
    /// Creates a new `ParamGen` sampling uniformly from `[0, 1)`.
    pub fn standard(rng: R) -> Self {
        Self::new(rng, StandardUniform)
    }
}

impl ParamGen<StdRng, StandardUniform> {
    /// Creates a new `ParamGen` sampling from `[0, 1)`, seeded from `seed` or from the OS.
    pub fn seeded(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self::standard(rng)
    }
}

impl<R: Rng> ParamGen<R, Uniform<f64>> {
    /// Creates a new `ParamGen` with a uniform distribution.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high or not finite).
    pub fn uniform(rng: R, low: f64, high: f64) -> Result<Self> {
        let distribution = Uniform::new(low, high)
            .map_err(|e| RegressionErr::invalid("initial_range", format!("[{low}, {high}): {e}")))?;

        Ok(Self::new(rng, distribution))
    }
}
