//! Scheduler orchestrating workers under a shared deadline and gate.

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::config::SchedulerConfig;
use crate::core::{
    AdmissionGate, BoxedTask, DeadlineClock, ResultSet, SchedulerError, TaskFailure, TaskOutcome,
    Worker,
};
use crate::runtime::TokioSpawner;
use crate::util::clock::now_ms;

/// Abstraction for spawning workers on a runtime.
///
/// The returned handle is the worker's result slot: the scheduler awaits the
/// handles in submission order, so no shared collection is written
/// concurrently.
pub trait Spawn {
    /// Spawn a future and return a handle to its output.
    fn spawn<F>(&self, fut: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static;
}

/// Bounded-concurrency scheduler with an overall and a per-task deadline.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use prometheus_deadline_scheduler::config::SchedulerConfig;
/// use prometheus_deadline_scheduler::core::{task_fn, Scheduler};
///
/// let config = SchedulerConfig::new()
///     .with_max_concurrency(2)
///     .with_per_task_timeout(Duration::from_secs(1))
///     .with_overall_timeout(Duration::from_secs(3));
/// let scheduler = Scheduler::new(config)?;
///
/// let tasks = (0..4).map(|_| task_fn(|_token| async { Ok(()) })).collect();
/// let results = scheduler.run(tasks).await;
/// assert_eq!(results.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler<S = TokioSpawner> {
    config: SchedulerConfig,
    spawner: S,
}

impl Scheduler<TokioSpawner> {
    /// Create a scheduler that spawns workers on the ambient tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        Self::with_spawner(config, TokioSpawner::default())
    }
}

impl<S: Spawn> Scheduler<S> {
    /// Create a scheduler that spawns workers through `spawner`.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfig` if the configuration is invalid.
    pub fn with_spawner(config: SchedulerConfig, spawner: S) -> Result<Self, SchedulerError> {
        config.validate()?;
        Ok(Self { config, spawner })
    }

    /// Configuration used for every run.
    #[must_use]
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Run every task once and return their outcomes in submission order.
    ///
    /// All workers are started before the scheduler waits; the call returns
    /// only after every worker has terminated, including workers whose task
    /// ignores its cancellation token.
    pub async fn run(&self, tasks: Vec<BoxedTask>) -> ResultSet {
        let run_id = Uuid::new_v4();
        let span = info_span!("scheduler_run", %run_id, tasks = tasks.len());
        let started = Instant::now();

        let clock = DeadlineClock::start(self.config.overall_timeout);
        let gate = AdmissionGate::new(self.config.max_concurrency);

        let handles: Vec<_> = tasks
            .into_iter()
            .enumerate()
            .map(|(index, task)| {
                let worker = Worker::new(
                    index,
                    task,
                    gate.clone(),
                    clock.token(),
                    self.config.per_task_timeout,
                );
                self.spawner.spawn(worker.run().instrument(span.clone()))
            })
            .collect();

        let outcomes: Vec<TaskOutcome> = join_all(handles)
            .instrument(span.clone())
            .await
            .into_iter()
            .enumerate()
            .map(|(index, joined)| {
                joined.unwrap_or_else(|err| {
                    error!(parent: &span, index, error = %err, "worker lost before reporting");
                    let now = now_ms();
                    TaskOutcome::finished(
                        index,
                        now,
                        now,
                        Duration::ZERO,
                        Some(TaskFailure::Task(anyhow::anyhow!("worker lost: {err}"))),
                    )
                })
            })
            .collect();
        clock.cancel();

        let results = ResultSet::new(run_id, outcomes, started.elapsed(), gate.peak_in_flight());
        let summary = results.summary();
        info!(
            parent: &span,
            total = summary.total,
            succeeded = summary.succeeded,
            task_errors = summary.task_errors,
            task_timeouts = summary.task_timeouts,
            scheduler_timeouts = summary.scheduler_timeouts,
            elapsed_ms = summary.elapsed_ms,
            "scheduler run finished"
        );
        results
    }
}

/// Validate `config`, run `tasks` on the ambient runtime and return their
/// outcomes.
///
/// # Errors
///
/// Returns `SchedulerError::InvalidConfig` before any task starts if the
/// configuration is invalid.
pub async fn run_tasks(
    tasks: Vec<BoxedTask>,
    config: SchedulerConfig,
) -> Result<ResultSet, SchedulerError> {
    let scheduler = Scheduler::new(config)?;
    Ok(scheduler.run(tasks).await)
}
