//! Tokio runtime spawner implementation.

use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::core::Spawn;

/// Tokio-based spawner that executes workers on a tokio runtime.
///
/// The default spawner uses whichever runtime is current at spawn time.
#[derive(Debug, Clone, Default)]
pub struct TokioSpawner {
    handle: Option<Handle>,
}

impl TokioSpawner {
    /// Create a `TokioSpawner` pinned to a specific runtime handle.
    #[must_use]
    pub const fn new(handle: Handle) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// Create a `TokioSpawner` pinned to the runtime of the caller.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Spawn for TokioSpawner {
    fn spawn<F>(&self, fut: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        match &self.handle {
            Some(handle) => handle.spawn(fut),
            None => tokio::spawn(fut),
        }
    }
}
