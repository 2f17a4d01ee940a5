//! Builders to construct schedulers from configuration.

pub mod scheduler_builder;

pub use scheduler_builder::{build_blocking_scheduler, build_scheduler, build_scheduler_from_json};
