//! Per-task outcomes and the fixed-size result set of a run.

use std::ops::Index;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{FailureKind, TaskFailure};
use crate::util::clock::now_ms;

/// Recorded result of one task's scheduling attempt.
#[derive(Debug)]
pub struct TaskOutcome {
    /// Position of the task in the submitted sequence.
    pub index: usize,
    /// Wall-clock start in milliseconds since epoch.
    pub start_ms: u128,
    /// Wall-clock end in milliseconds since epoch.
    pub end_ms: u128,
    /// Monotonic time between start and end. Zero for tasks never admitted.
    pub duration: Duration,
    /// Whether the task returned success within its window.
    pub succeeded: bool,
    /// Failure detail; `None` exactly when `succeeded`.
    pub error: Option<TaskFailure>,
}

impl TaskOutcome {
    /// Outcome of a task that ran to completion or timed out.
    pub(crate) fn finished(
        index: usize,
        start_ms: u128,
        end_ms: u128,
        duration: Duration,
        error: Option<TaskFailure>,
    ) -> Self {
        Self {
            index,
            start_ms,
            end_ms,
            duration,
            succeeded: error.is_none(),
            error,
        }
    }

    /// Outcome of a task the overall deadline kept from starting.
    pub(crate) fn never_started(index: usize) -> Self {
        let now = now_ms();
        Self::finished(index, now, now, Duration::ZERO, Some(TaskFailure::SchedulerTimeout))
    }

    /// Classification of the failure, if any.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.error.as_ref().map(TaskFailure::kind)
    }
}

/// Counts describing a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of submitted tasks.
    pub total: usize,
    /// Tasks that succeeded.
    pub succeeded: usize,
    /// Tasks that reported their own failure.
    pub task_errors: usize,
    /// Tasks whose derived window elapsed.
    pub task_timeouts: usize,
    /// Tasks never admitted before the overall deadline.
    pub scheduler_timeouts: usize,
    /// Wall time of the whole run in milliseconds.
    pub elapsed_ms: u128,
    /// Highest number of tasks admitted at once.
    pub peak_in_flight: usize,
}

/// Ordered, index-addressed outcomes of one run.
///
/// `results[i]` always describes `tasks[i]`, and the length always equals the
/// number of submitted tasks.
#[derive(Debug)]
pub struct ResultSet {
    run_id: Uuid,
    outcomes: Vec<TaskOutcome>,
    elapsed: Duration,
    peak_in_flight: usize,
}

impl ResultSet {
    pub(crate) fn new(
        run_id: Uuid,
        outcomes: Vec<TaskOutcome>,
        elapsed: Duration,
        peak_in_flight: usize,
    ) -> Self {
        debug_assert!(outcomes.iter().enumerate().all(|(i, o)| o.index == i));
        Self {
            run_id,
            outcomes,
            elapsed,
            peak_in_flight,
        }
    }

    /// Identifier of the run that produced these outcomes.
    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Number of outcomes (equals the number of submitted tasks).
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when no tasks were submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcome for the task at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TaskOutcome> {
        self.outcomes.get(index)
    }

    /// Outcomes in submission order.
    pub fn iter(&self) -> std::slice::Iter<'_, TaskOutcome> {
        self.outcomes.iter()
    }

    /// Outcomes as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[TaskOutcome] {
        &self.outcomes
    }

    /// Successful outcomes in submission order.
    pub fn successes(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| o.succeeded)
    }

    /// Failed outcomes in submission order.
    pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded)
    }

    /// Wall time from the start of the run to the join barrier.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Highest number of tasks admitted at once during the run.
    #[must_use]
    pub const fn peak_in_flight(&self) -> usize {
        self.peak_in_flight
    }

    /// Aggregate counts for the run.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            total: self.outcomes.len(),
            elapsed_ms: self.elapsed.as_millis(),
            peak_in_flight: self.peak_in_flight,
            ..RunSummary::default()
        };
        for outcome in &self.outcomes {
            match outcome.failure_kind() {
                None => summary.succeeded += 1,
                Some(FailureKind::Task) => summary.task_errors += 1,
                Some(FailureKind::TaskTimeout) => summary.task_timeouts += 1,
                Some(FailureKind::SchedulerTimeout) => summary.scheduler_timeouts += 1,
            }
        }
        summary
    }

    /// Consume the set, returning the outcomes in submission order.
    #[must_use]
    pub fn into_vec(self) -> Vec<TaskOutcome> {
        self.outcomes
    }
}

impl Index<usize> for ResultSet {
    type Output = TaskOutcome;

    fn index(&self, index: usize) -> &Self::Output {
        &self.outcomes[index]
    }
}

impl IntoIterator for ResultSet {
    type Item = TaskOutcome;
    type IntoIter = std::vec::IntoIter<TaskOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a TaskOutcome;
    type IntoIter = std::slice::Iter<'a, TaskOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
