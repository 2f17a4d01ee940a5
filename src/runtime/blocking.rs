//! Synchronous front-end owning its own multi-thread runtime.

use tokio::runtime::{Builder, Runtime};
use tracing::info;

use crate::config::SchedulerConfig;
use crate::core::{BoxedTask, ResultSet, Scheduler, SchedulerError};
use crate::runtime::TokioSpawner;

/// Scheduler for callers outside any async context.
///
/// Workers run in parallel on a dedicated multi-thread tokio runtime; `run`
/// blocks the calling thread until every worker has terminated.
///
/// ```rust,ignore
/// let scheduler = BlockingScheduler::new(SchedulerConfig::default())?;
/// let results = scheduler.run(tasks);
/// println!("all tasks returned in {:?}", results.elapsed());
/// ```
pub struct BlockingScheduler {
    runtime: Runtime,
    scheduler: Scheduler<TokioSpawner>,
}

impl BlockingScheduler {
    /// Build a runtime with one worker thread per CPU.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfig` for an invalid configuration
    /// and `SchedulerError::Runtime` if the runtime cannot be built.
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        Self::with_worker_threads(config, num_cpus::get())
    }

    /// Build a runtime with a specific number of worker threads.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfig` for an invalid configuration
    /// and `SchedulerError::Runtime` if the runtime cannot be built.
    pub fn with_worker_threads(
        config: SchedulerConfig,
        worker_threads: usize,
    ) -> Result<Self, SchedulerError> {
        config.validate()?;
        let runtime = Builder::new_multi_thread()
            .worker_threads(worker_threads.max(1))
            .thread_name("deadline-scheduler")
            .enable_all()
            .build()?;
        let scheduler =
            Scheduler::with_spawner(config, TokioSpawner::new(runtime.handle().clone()))?;
        info!(worker_threads, "blocking scheduler runtime started");
        Ok(Self { runtime, scheduler })
    }

    /// Configuration used for every run.
    #[must_use]
    pub const fn config(&self) -> &SchedulerConfig {
        self.scheduler.config()
    }

    /// Run every task once, blocking until all workers have terminated.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async context.
    #[must_use]
    pub fn run(&self, tasks: Vec<BoxedTask>) -> ResultSet {
        self.runtime.block_on(self.scheduler.run(tasks))
    }
}
