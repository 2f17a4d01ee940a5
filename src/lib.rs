//! # Prometheus Deadline Scheduler
//!
//! A bounded-concurrency task scheduler with hierarchical deadlines for the
//! "run N tasks with at most K in flight, an overall wall-clock budget, and a
//! per-task budget" pattern.
//!
//! ## Core Problem Solved
//!
//! Fan-out workloads (batches of HTTP fetches, tool calls, inference
//! requests) need three limits at once:
//!
//! - **Concurrency**: never more than `max_concurrency` tasks executing
//! - **Overall budget**: the whole batch must finish within `overall_timeout`
//! - **Per-task budget**: each task gets at most `per_task_timeout`, further
//!   capped by whatever is left of the overall budget
//!
//! and every submitted task must be accounted for, including tasks that
//! never got a slot before the overall budget ran out.
//!
//! ## Key Features
//!
//! - **Admission Gate**: semaphore-backed slots raced against the deadline
//! - **Deadline Clock**: one shared, monotonic cancellation token per run
//! - **Derived tokens**: per-task tokens firing at `min(overall, now + per_task)`
//! - **Index-owned results**: `results[i]` always describes `tasks[i]`
//! - **Cooperative cancellation**: tasks that ignore their token are reported
//!   as timed out, never killed
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use prometheus_deadline_scheduler::config::SchedulerConfig;
//! use prometheus_deadline_scheduler::core::{task_fn, DeadlineToken, Scheduler};
//!
//! let scheduler = Scheduler::new(
//!     SchedulerConfig::new()
//!         .with_max_concurrency(3)
//!         .with_per_task_timeout(Duration::from_secs(2))
//!         .with_overall_timeout(Duration::from_secs(2)),
//! )?;
//!
//! let tasks = (0..10)
//!     .map(|_| task_fn(|token: DeadlineToken| async move {
//!         tokio::select! {
//!             () = token.fired() => anyhow::bail!("cancelled"),
//!             () = tokio::time::sleep(Duration::from_secs(1)) => Ok(()),
//!         }
//!     }))
//!     .collect();
//!
//! let results = scheduler.run(tasks).await;
//! for outcome in &results {
//!     println!("[task {}] {:?} {:?}", outcome.index, outcome.duration, outcome.error);
//! }
//! ```
//!
//! For complete examples, see:
//! - `tests/scheduler_test.rs` - End-to-end scheduling scenarios

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions: deadlines, admission, workers and outcomes.
pub mod core;
/// Configuration models for concurrency and timeouts.
pub mod config;
/// Builders to construct schedulers from configuration.
pub mod builders;
/// Infrastructure adapters that sit next to the scheduler.
pub mod infra;
/// Runtime adapters and reporting API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;

pub use crate::config::SchedulerConfig;
pub use crate::core::{
    run_tasks, task_fn, BoxedTask, DeadlineToken, FailureKind, ResultSet, Scheduler,
    SchedulerError, Task, TaskFailure, TaskOutcome,
};
