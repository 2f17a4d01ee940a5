//! Runtime adapters and the reporting API surface.

pub mod api;
pub mod blocking;
pub mod tokio_spawner;

pub use api::{OutcomeReport, OutcomeStatus, RunReport};
pub use blocking::BlockingScheduler;
pub use tokio_spawner::TokioSpawner;
