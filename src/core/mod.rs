//! Core scheduling abstractions: deadlines, admission, workers and outcomes.

pub mod deadline;
pub mod error;
pub mod gate;
pub mod outcome;
pub mod scheduler;
pub mod task;
pub mod worker;

pub use deadline::{DeadlineClock, DeadlineToken};
pub use error::{AppResult, FailureKind, SchedulerError, TaskFailure};
pub use gate::{Admission, AdmissionGate, GatePermit};
pub use outcome::{ResultSet, RunSummary, TaskOutcome};
pub use scheduler::{run_tasks, Scheduler, Spawn};
pub use task::{task_fn, BoxedTask, Task};
pub use worker::Worker;
