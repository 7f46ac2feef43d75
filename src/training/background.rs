use std::sync::Arc;

use futures::{Stream, stream};
use log::debug;
use tokio::{
    sync::mpsc,
    task::{self, JoinHandle},
};

use super::{Trainer, TrainingResult, TrainingSnapshot};
use crate::{
    Result,
    arch::{ModelParameters, loss::LossFn},
    dataset::Dataset,
    optimization::Optimizer,
};

/// What a background training run reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainingEvent {
    Snapshot(TrainingSnapshot),
    Finished(TrainingResult),
}

/// The receiving end of a background training run.
///
/// Dropping it abandons the remaining iterations: the run stops the next
/// time it tries to hand over a snapshot.
pub struct SnapshotReceiver {
    rx: mpsc::Receiver<Result<TrainingEvent>>,
    worker: JoinHandle<()>,
}

impl SnapshotReceiver {
    /// Waits for the next event.
    ///
    /// # Returns
    /// `None` once the run has finished, failed or panicked.
    pub async fn recv(&mut self) -> Option<Result<TrainingEvent>> {
        self.rx.recv().await
    }

    /// Stops pulling snapshots and waits for the run to wind down.
    pub async fn close(self) {
        let Self { rx, worker } = self;
        drop(rx);

        if let Err(e) = worker.await {
            debug!("training task ended abnormally: {e}");
        }
    }

    /// Turns the receiver into a stream of events.
    pub fn into_stream(self) -> impl Stream<Item = Result<TrainingEvent>> {
        stream::unfold(self, |mut receiver| async move {
            let event = receiver.recv().await?;
            Some((event, receiver))
        })
    }
}

/// Runs a training on tokio's blocking pool, handing over events through a channel.
///
/// The channel holds a single event, so the run stays at most one snapshot
/// ahead of the receiver.
///
/// # Arguments
/// * `trainer` - The trainer to run.
/// * `dataset` - The points to fit, shared read-only with the run.
/// * `params` - The initial parameters.
///
/// # Panics
/// If called outside of a tokio runtime.
pub fn spawn<O, L>(
    trainer: Trainer<O, L>,
    dataset: Arc<Dataset>,
    params: ModelParameters,
) -> SnapshotReceiver
where
    O: Optimizer + Clone + Send + 'static,
    L: LossFn + Clone + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);

    let worker = task::spawn_blocking(move || {
        let mut training = trainer.train(&dataset, params);

        while let Some(snapshot) = training.next() {
            let event = snapshot.map(TrainingEvent::Snapshot);

            if tx.blocking_send(event).is_err() {
                debug!(
                    "receiver dropped, abandoning run at iteration {}",
                    training.iteration()
                );
                return;
            }
        }

        if let Some(result) = training.outcome() {
            if tx.blocking_send(Ok(TrainingEvent::Finished(result))).is_err() {
                debug!("receiver dropped before the final result: {result:?}");
            }
        }
    });

    SnapshotReceiver { rx, worker }
}
