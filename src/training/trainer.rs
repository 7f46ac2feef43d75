use std::{iter::FusedIterator, num::NonZeroUsize};

use log::{debug, info, warn};

use super::{TrainingResult, TrainingSnapshot};
use crate::{
    Result,
    arch::{ModelParameters, loss::LossFn},
    dataset::Dataset,
    error::RegressionErr,
    optimization::Optimizer,
};

/// How many iterations separate two snapshots unless configured otherwise.
pub const DEFAULT_REPORT_EVERY: NonZeroUsize = NonZeroUsize::new(1000).expect("1000 is not zero");

/// A model `Trainer`. Holds the relevant components needed for fitting a line to a dataset.
#[derive(Debug, Clone)]
pub struct Trainer<O, L>
where
    O: Optimizer,
    L: LossFn,
{
    optimizer: O,
    loss_fn: L,
    max_iterations: NonZeroUsize,
    report_every: NonZeroUsize,
}

impl<O, L> Trainer<O, L>
where
    O: Optimizer,
    L: LossFn,
{
    /// Returns a new `Trainer`, reporting every `DEFAULT_REPORT_EVERY` iterations.
    ///
    /// # Arguments
    /// * `optimizer` - Dictates how the parameters move on each gradient calculation.
    /// * `loss_fn` - Measures the difference between the model's output and the targets.
    /// * `max_iterations` - The amount of update steps of a run.
    ///
    /// # Errors
    /// `InvalidParameter` if `max_iterations` is zero.
    pub fn new(optimizer: O, loss_fn: L, max_iterations: usize) -> Result<Self> {
        let max_iterations = NonZeroUsize::new(max_iterations)
            .ok_or_else(|| RegressionErr::invalid("max_iterations", "must be positive, got 0"))?;

        Ok(Self {
            optimizer,
            loss_fn,
            max_iterations,
            report_every: DEFAULT_REPORT_EVERY,
        })
    }

    /// Changes the reporting cadence.
    ///
    /// # Errors
    /// `InvalidParameter` if `report_every` is zero.
    pub fn with_report_every(mut self, report_every: usize) -> Result<Self> {
        self.report_every = NonZeroUsize::new(report_every)
            .ok_or_else(|| RegressionErr::invalid("report_every", "must be positive, got 0"))?;

        Ok(self)
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations.get()
    }

    pub fn report_every(&self) -> usize {
        self.report_every.get()
    }
}

impl<O, L> Trainer<O, L>
where
    O: Optimizer + Clone,
    L: LossFn + Clone,
{
    /// Starts a lazy training run over `dataset`.
    ///
    /// Nothing is computed until the returned `Training` is pulled.
    ///
    /// # Arguments
    /// * `dataset` - The points to fit, borrowed for the whole run.
    /// * `params` - The initial parameters.
    pub fn train<'a>(&self, dataset: &'a Dataset, params: ModelParameters) -> Training<'a, O, L> {
        info!(
            "training on {} points ({} valid) for {} iterations from {params:?}",
            dataset.len(),
            dataset.valid().count(),
            self.max_iterations
        );

        Training {
            dataset,
            optimizer: self.optimizer.clone(),
            loss_fn: self.loss_fn.clone(),
            params,
            max_iterations: self.max_iterations.get(),
            report_every: self.report_every.get(),
            next_iteration: 0,
            diverged: false,
            state: State::Running,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Running,
    Finished(TrainingResult),
    Failed,
}

/// An in-progress training run.
///
/// Yields a `TrainingSnapshot` every `report_every` iterations, starting at
/// iteration `0`. Each pull resumes the loop exactly where the previous one
/// stopped; dropping the run abandons the remaining iterations. Once the
/// iterator is exhausted, `outcome` holds the final `TrainingResult`.
pub struct Training<'a, O, L>
where
    O: Optimizer,
    L: LossFn,
{
    dataset: &'a Dataset,
    optimizer: O,
    loss_fn: L,
    params: ModelParameters,
    max_iterations: usize,
    report_every: usize,
    next_iteration: usize,
    diverged: bool,
    state: State,
}

impl<O, L> Training<'_, O, L>
where
    O: Optimizer,
    L: LossFn,
{
    /// The parameters after every update applied so far.
    pub fn params(&self) -> ModelParameters {
        self.params
    }

    /// The amount of update steps applied so far.
    pub fn iteration(&self) -> usize {
        self.next_iteration
    }

    /// Returns the final result, or `None` while iterations remain or after a failure.
    pub fn outcome(&self) -> Option<TrainingResult> {
        match self.state {
            State::Finished(result) => Some(result),
            _ => None,
        }
    }

    /// Runs every remaining iteration, discarding the snapshots.
    ///
    /// # Errors
    /// `EmptyDataset` if the dataset has nothing to fit.
    pub fn finish(mut self) -> Result<TrainingResult> {
        while let Some(snapshot) = self.next() {
            snapshot?;
        }

        // a dataset cannot change during a run, so failing is always caused by it being empty
        self.outcome().ok_or(RegressionErr::EmptyDataset)
    }

    fn step(&mut self) -> Result<()> {
        let grad = self.loss_fn.loss_prime(self.dataset, &self.params)?;
        self.optimizer.update_params(&mut self.params, &grad);
        Ok(())
    }

    fn snapshot(&mut self, iteration: usize) -> Result<TrainingSnapshot> {
        let cost = self.loss_fn.loss(self.dataset, &self.params)?;

        if !cost.is_finite() && !self.diverged {
            warn!("cost is no longer finite at iteration {iteration}: {cost}");
            self.diverged = true;
        }

        let snapshot = TrainingSnapshot {
            weight: self.params.weight,
            bias: self.params.bias,
            cost,
            iteration,
        };

        debug!("{snapshot:?}");
        Ok(snapshot)
    }
}

impl<O, L> Iterator for Training<'_, O, L>
where
    O: Optimizer,
    L: LossFn,
{
    type Item = Result<TrainingSnapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != State::Running {
            return None;
        }

        while self.next_iteration < self.max_iterations {
            let i = self.next_iteration;

            let reported = self.step().and_then(|()| {
                self.next_iteration += 1;

                if i % self.report_every == 0 {
                    self.snapshot(i).map(Some)
                } else {
                    Ok(None)
                }
            });

            match reported {
                Ok(Some(snapshot)) => return Some(Ok(snapshot)),
                Ok(None) => {}
                Err(e) => {
                    self.state = State::Failed;
                    return Some(Err(e));
                }
            }
        }

        let result = TrainingResult {
            weight: self.params.weight,
            bias: self.params.bias,
            iteration: self.max_iterations,
        };

        info!("training finished: {result:?}");
        self.state = State::Finished(result);
        None
    }
}

impl<O, L> FusedIterator for Training<'_, O, L>
where
    O: Optimizer,
    L: LossFn,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arch::loss::Mse, optimization::GradientDescent};

    fn line() -> Dataset {
        [(1.0, 3.0), (2.0, 5.0), (3.0, 7.0)].into_iter().collect()
    }

    fn trainer(lr: f64, max_iterations: usize) -> Trainer<GradientDescent, Mse> {
        Trainer::new(GradientDescent::new(lr).unwrap(), Mse::new(), max_iterations).unwrap()
    }

    #[test]
    fn zero_iterations_are_rejected() {
        assert!(matches!(
            Trainer::new(GradientDescent::default(), Mse::new(), 0),
            Err(RegressionErr::InvalidParameter {
                name: "max_iterations",
                ..
            })
        ));
    }

    #[test]
    fn reports_every_thousand_iterations_by_default() {
        assert_eq!(DEFAULT_REPORT_EVERY.get(), 1000);
        assert_eq!(trainer(1e-3, 10).report_every(), 1000);
    }

    #[test]
    fn zero_report_cadence_is_rejected() {
        let err = trainer(1e-3, 10).with_report_every(0).unwrap_err();
        assert!(matches!(
            err,
            RegressionErr::InvalidParameter {
                name: "report_every",
                ..
            }
        ));
    }

    #[test]
    fn snapshots_every_thousand_iterations() {
        let ds = line();
        let trainer = trainer(1e-3, 3000);
        let mut training = trainer.train(&ds, ModelParameters::default());

        let iterations: Vec<_> = training
            .by_ref()
            .map(|s| s.unwrap().iteration)
            .collect();

        assert_eq!(iterations, [0, 1000, 2000]);
        assert_eq!(training.outcome().unwrap().iteration, 3000);
        assert_eq!(training.iteration(), 3000);
    }

    #[test]
    fn single_iteration_still_reports() {
        let ds = line();
        let mut training = trainer(1e-3, 1).train(&ds, ModelParameters::default());

        assert_eq!(training.next().unwrap().unwrap().iteration, 0);
        assert!(training.next().is_none());
        assert_eq!(training.outcome().unwrap().iteration, 1);
    }

    #[test]
    fn custom_cadence() {
        let ds = line();
        let trainer = trainer(1e-3, 10).with_report_every(4).unwrap();
        let iterations: Vec<_> = trainer
            .train(&ds, ModelParameters::default())
            .map(|s| s.unwrap().iteration)
            .collect();

        assert_eq!(iterations, [0, 4, 8]);
    }

    #[test]
    fn snapshot_reflects_the_updated_parameters() {
        let ds = line();
        let mut training = trainer(1e-3, 3000).train(&ds, ModelParameters::default());
        let first = training.next().unwrap().unwrap();

        // one step from the origin: -lr * gradient(0, 0)
        let expected_weight = 1e-3 * 34.0 / 3.0;
        let expected_bias = 1e-3 * 5.0;

        assert!((first.weight - expected_weight).abs() < 1e-12);
        assert!((first.bias - expected_bias).abs() < 1e-12);

        let expected_cost = crate::arch::loss::cost(&ds, first.weight, first.bias).unwrap();
        assert_eq!(first.cost, expected_cost);
    }

    #[test]
    fn pulling_resumes_where_it_stopped() {
        let ds = line();
        let mut training = trainer(1e-3, 5000).train(&ds, ModelParameters::default());

        training.next().unwrap().unwrap();
        assert_eq!(training.iteration(), 1);
        assert!(training.outcome().is_none());

        let second = training.next().unwrap().unwrap();
        assert_eq!(second.iteration, 1000);
        assert_eq!(training.iteration(), 1001);
        assert_eq!(training.params(), second.params());
    }

    #[test]
    fn cost_decreases_on_a_linear_dataset() {
        let ds = line();
        let initial_cost = crate::arch::loss::cost(&ds, 0.0, 0.0).unwrap();
        let costs: Vec<_> = trainer(1e-3, 5000)
            .train(&ds, ModelParameters::default())
            .map(|s| s.unwrap().cost)
            .collect();

        assert_eq!(costs.len(), 5);
        assert!(costs.windows(2).all(|w| w[1] <= w[0]), "{costs:?}");
        assert!(*costs.last().unwrap() < initial_cost);
    }

    #[test]
    fn finish_drains_the_run() {
        let ds = line();
        let result = trainer(1e-3, 2500)
            .train(&ds, ModelParameters::default())
            .finish()
            .unwrap();

        assert_eq!(result.iteration, 2500);
        assert!(result.weight > 0.0);
    }

    #[test]
    fn empty_dataset_fails_on_first_pull() {
        let ds = Dataset::default();
        let mut training = trainer(1e-3, 3000).train(&ds, ModelParameters::default());

        assert!(matches!(
            training.next(),
            Some(Err(RegressionErr::EmptyDataset))
        ));
        assert!(training.next().is_none());
        assert!(training.outcome().is_none());
        assert_eq!(training.iteration(), 0);
    }

    #[test]
    fn finish_on_invalid_only_dataset_fails() {
        let ds: Dataset = [(-1.0, 1.0), (1.0, -1.0)].into_iter().collect();
        let result = trainer(1e-3, 10)
            .train(&ds, ModelParameters::default())
            .finish();

        assert!(matches!(result, Err(RegressionErr::EmptyDataset)));
    }

    #[test]
    fn divergence_is_passed_through() {
        let ds: Dataset = [(10.0, 1.0), (20.0, 2.0), (30.0, 3.0)]
            .into_iter()
            .collect();

        let snapshots: Vec<_> = trainer(1.0, 3000)
            .train(&ds, ModelParameters::default())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(snapshots.len(), 3);
        assert!(!snapshots.last().unwrap().cost.is_finite());
    }

    #[test]
    fn tiny_learning_rate_keeps_parameters() {
        let ds = line();
        let start = ModelParameters::new(0.5, 0.25);

        for s in trainer(f64::MIN_POSITIVE, 3000).train(&ds, start) {
            let s = s.unwrap();
            assert!((s.weight - start.weight).abs() < 1e-12);
            assert!((s.bias - start.bias).abs() < 1e-12);
        }
    }
}
