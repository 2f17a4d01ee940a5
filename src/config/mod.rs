//! Configuration models for scheduler runs.

pub mod scheduler;

pub use scheduler::{SchedulerConfig, SchedulerSettings};
