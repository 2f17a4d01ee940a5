//! One execution attempt for one task.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::core::{
    Admission, AdmissionGate, BoxedTask, DeadlineToken, TaskFailure, TaskOutcome,
};
use crate::util::clock::now_ms;

/// Runs a single task through the gate and records its outcome.
///
/// A worker is bound to one index of the result set and produces exactly one
/// [`TaskOutcome`] for it.
pub struct Worker {
    index: usize,
    task: BoxedTask,
    gate: AdmissionGate,
    overall: DeadlineToken,
    per_task_timeout: Duration,
}

impl Worker {
    /// Bind a task to its result slot.
    #[must_use]
    pub fn new(
        index: usize,
        task: BoxedTask,
        gate: AdmissionGate,
        overall: DeadlineToken,
        per_task_timeout: Duration,
    ) -> Self {
        Self {
            index,
            task,
            gate,
            overall,
            per_task_timeout,
        }
    }

    /// Wait for admission, run the task and report what happened.
    ///
    /// A task that ignores its token is reported as timed out as soon as the
    /// token fires, but it is still polled to completion before the gate slot
    /// is released. The scheduler therefore waits for it too.
    pub async fn run(self) -> TaskOutcome {
        let Self {
            index,
            task,
            gate,
            overall,
            per_task_timeout,
        } = self;

        let permit = match gate.try_acquire(&overall).await {
            Admission::Admitted(permit) => permit,
            Admission::DeadlineFired => {
                warn!(index, "scheduler timeout before start");
                return TaskOutcome::never_started(index);
            }
        };

        let start = Instant::now();
        let start_ms = now_ms();
        let token = overall.child(per_task_timeout);
        let budget = token.remaining();
        debug!(index, budget_ms = budget.as_millis(), "task admitted");

        let run = AssertUnwindSafe(task.run(token.clone())).catch_unwind();
        tokio::pin!(run);

        let returned = tokio::select! {
            biased;
            res = &mut run => Some(res),
            () = token.fired() => None,
        };
        let duration = start.elapsed();
        let end_ms = now_ms();

        let error = match returned {
            Some(Ok(Ok(()))) => None,
            Some(Ok(Err(err))) if token.is_fired() => {
                debug!(index, error = %err, "task gave up after its token fired");
                Some(TaskFailure::TaskTimeout {
                    budget,
                    source: Some(err),
                })
            }
            Some(Ok(Err(err))) => Some(TaskFailure::Task(err)),
            Some(Err(panic)) => Some(TaskFailure::Task(anyhow::anyhow!(
                "task panicked: {}",
                panic_message(panic.as_ref())
            ))),
            None => {
                warn!(
                    index,
                    budget_ms = budget.as_millis(),
                    "task timed out; waiting for it to return"
                );
                if let Err(panic) = run.await {
                    warn!(index, "timed out task panicked: {}", panic_message(panic.as_ref()));
                }
                Some(TaskFailure::TaskTimeout {
                    budget,
                    source: None,
                })
            }
        };

        permit.release();
        match &error {
            None => debug!(index, duration_ms = duration.as_millis(), "task succeeded"),
            Some(err) => debug!(index, duration_ms = duration.as_millis(), error = %err, "task failed"),
        }
        TaskOutcome::finished(index, start_ms, end_ms, duration, error)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
