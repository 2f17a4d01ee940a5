//! Builders to construct schedulers from configuration sources.

use crate::config::SchedulerConfig;
use crate::core::{Scheduler, SchedulerError, Spawn};
use crate::runtime::BlockingScheduler;

/// Build a scheduler from configuration using the provided spawner.
///
/// # Errors
///
/// Returns `SchedulerError::InvalidConfig` if the configuration is invalid.
pub fn build_scheduler<S>(cfg: &SchedulerConfig, spawner: S) -> Result<Scheduler<S>, SchedulerError>
where
    S: Spawn,
{
    tracing::debug!(max_concurrency = cfg.max_concurrency, "building scheduler");
    Scheduler::with_spawner(cfg.clone(), spawner)
}

/// Parse a JSON configuration and build a scheduler on the ambient runtime.
///
/// # Errors
///
/// Returns `SchedulerError::Parse` or `SchedulerError::InvalidConfig` if the
/// document is malformed or out of range.
pub fn build_scheduler_from_json(input: &str) -> Result<Scheduler, SchedulerError> {
    let cfg = SchedulerConfig::from_json_str(input)?;
    Scheduler::new(cfg)
}

/// Build a blocking scheduler from the process environment (and `.env`).
///
/// # Errors
///
/// Returns `SchedulerError::InvalidConfig` for bad values and
/// `SchedulerError::Runtime` if the runtime cannot be built.
pub fn build_blocking_scheduler() -> Result<BlockingScheduler, SchedulerError> {
    let cfg = SchedulerConfig::from_env()?;
    tracing::info!(
        max_concurrency = cfg.max_concurrency,
        per_task_timeout_ms = cfg.per_task_timeout.as_millis(),
        overall_timeout_ms = cfg.overall_timeout.as_millis(),
        "building scheduler from environment"
    );
    BlockingScheduler::new(cfg)
}
