//! The task contract.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{AppResult, DeadlineToken};

/// A unit of cancellable work.
///
/// A task receives a [`DeadlineToken`] bounded by both its own budget and the
/// remaining overall budget of the run. Tasks should stop promptly once the
/// token fires; cancellation is cooperative and the scheduler never aborts a
/// task that keeps running.
///
/// Any `Fn(DeadlineToken) -> impl Future<Output = AppResult<()>>` closure is a
/// task.
///
/// # Example
///
/// ```rust,ignore
/// use prometheus_deadline_scheduler::core::{task_fn, DeadlineToken};
///
/// let fetch = task_fn(|token: DeadlineToken| async move {
///     tokio::select! {
///         () = token.fired() => anyhow::bail!("request cancelled"),
///         res = client.get("https://example.com").send() => {
///             res?.error_for_status()?;
///             Ok(())
///         }
///     }
/// });
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Run the task until it finishes or decides to honor `token`.
    async fn run(&self, token: DeadlineToken) -> AppResult<()>;
}

#[async_trait]
impl<F, Fut> Task for F
where
    F: Fn(DeadlineToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<()>> + Send + 'static,
{
    async fn run(&self, token: DeadlineToken) -> AppResult<()> {
        (self)(token).await
    }
}

/// Shared, type-erased task as accepted by the scheduler.
pub type BoxedTask = Arc<dyn Task>;

/// Wrap a closure as a [`BoxedTask`].
pub fn task_fn<F, Fut>(f: F) -> BoxedTask
where
    F: Fn(DeadlineToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<()>> + Send + 'static,
{
    Arc::new(f)
}
