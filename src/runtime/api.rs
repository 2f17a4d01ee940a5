//! API-facing report models for finished runs.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::{FailureKind, ResultSet, RunSummary, TaskOutcome};

/// Final status of one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Task succeeded.
    Success,
    /// Task failed, timed out or never started.
    Failed,
}

/// Serializable view of a [`TaskOutcome`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeReport {
    /// Task index.
    pub index: usize,
    /// Start (ms since epoch).
    pub start_ms: u128,
    /// End (ms since epoch).
    pub end_ms: u128,
    /// Duration in milliseconds.
    pub duration_ms: u128,
    /// Status.
    pub status: OutcomeStatus,
    /// Failure classification.
    pub kind: Option<FailureKind>,
    /// Failure message.
    pub error: Option<String>,
}

impl From<&TaskOutcome> for OutcomeReport {
    fn from(outcome: &TaskOutcome) -> Self {
        Self {
            index: outcome.index,
            start_ms: outcome.start_ms,
            end_ms: outcome.end_ms,
            duration_ms: outcome.duration.as_millis(),
            status: if outcome.succeeded {
                OutcomeStatus::Success
            } else {
                OutcomeStatus::Failed
            },
            kind: outcome.failure_kind(),
            error: outcome.error.as_ref().map(ToString::to_string),
        }
    }
}

/// Serializable report of a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Run identifier.
    pub run_id: String,
    /// Aggregate counts.
    pub summary: RunSummary,
    /// Per-task reports in submission order.
    pub outcomes: Vec<OutcomeReport>,
}

impl RunReport {
    /// Build a report from a finished run.
    #[must_use]
    pub fn from_results(results: &ResultSet) -> Self {
        Self {
            run_id: results.run_id().to_string(),
            summary: results.summary(),
            outcomes: results.iter().map(OutcomeReport::from).collect(),
        }
    }

    /// Render as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which does not happen for these types in
    /// practice.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Emit one log line per task followed by the total run time.
    pub fn log(&self) {
        for outcome in &self.outcomes {
            match outcome.status {
                OutcomeStatus::Success => info!(
                    run_id = %self.run_id,
                    index = outcome.index,
                    start_ms = outcome.start_ms,
                    end_ms = outcome.end_ms,
                    duration_ms = outcome.duration_ms,
                    "task SUCCESS"
                ),
                OutcomeStatus::Failed => warn!(
                    run_id = %self.run_id,
                    index = outcome.index,
                    start_ms = outcome.start_ms,
                    end_ms = outcome.end_ms,
                    duration_ms = outcome.duration_ms,
                    error = outcome.error.as_deref().unwrap_or("unknown"),
                    "task FAILED"
                ),
            }
        }
        info!(
            run_id = %self.run_id,
            succeeded = self.summary.succeeded,
            total = self.summary.total,
            "all tasks returned in {}ms",
            self.summary.elapsed_ms
        );
    }
}
