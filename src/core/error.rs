//! Error types for scheduler operations and per-task failures.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that fail a scheduler before any worker starts.
///
/// Once a run is underway nothing is fatal to the scheduler: every failure is
/// captured per task as a [`TaskFailure`].
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Configuration could not be parsed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The blocking front-end could not build its runtime.
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Why a single task did not succeed.
#[derive(Debug, Error)]
pub enum TaskFailure {
    /// The task reported failure; carried verbatim.
    #[error(transparent)]
    Task(anyhow::Error),
    /// The task's derived cancellation window elapsed before it returned.
    ///
    /// `source` holds the error the task gave up with, if it returned one
    /// after its token fired.
    #[error("task timeout after {budget:?}")]
    TaskTimeout {
        /// Window the task was given.
        budget: Duration,
        /// Error returned by the task once its token had fired.
        #[source]
        source: Option<anyhow::Error>,
    },
    /// The overall deadline elapsed before the task was admitted.
    #[error("scheduler timeout before start")]
    SchedulerTimeout,
}

/// Classification of a [`TaskFailure`], stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// See [`TaskFailure::Task`].
    Task,
    /// See [`TaskFailure::TaskTimeout`].
    TaskTimeout,
    /// See [`TaskFailure::SchedulerTimeout`].
    SchedulerTimeout,
}

impl TaskFailure {
    /// Classification of this failure.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Task(_) => FailureKind::Task,
            Self::TaskTimeout { .. } => FailureKind::TaskTimeout,
            Self::SchedulerTimeout => FailureKind::SchedulerTimeout,
        }
    }
}

/// Application-facing result using anyhow for higher-level contexts.
///
/// This is the return type of every [`Task`](crate::core::Task).
pub type AppResult<T> = Result<T, anyhow::Error>;
