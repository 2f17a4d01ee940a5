//! Deadline clock and hierarchical cancellation tokens.
//!
//! A [`DeadlineClock`] is started once per scheduler run from the overall
//! budget. Every worker receives a clone of its [`DeadlineToken`] and derives
//! a tighter child from it with [`DeadlineToken::child`]. A token fires when
//! its absolute deadline passes or when an ancestor is cancelled, and never
//! un-fires.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Source of the overall deadline for one scheduler run.
///
/// Dropping the clock cancels every token derived from it.
#[derive(Debug)]
pub struct DeadlineClock {
    token: DeadlineToken,
}

impl DeadlineClock {
    /// Start a clock that fires `overall` from now.
    #[must_use]
    pub fn start(overall: Duration) -> Self {
        let now = Instant::now();
        let deadline = now.checked_add(overall).unwrap_or_else(far_future);
        Self {
            token: DeadlineToken {
                deadline,
                cancel: CancellationToken::new(),
            },
        }
    }

    /// A read-only handle on the overall deadline.
    #[must_use]
    pub fn token(&self) -> DeadlineToken {
        self.token.clone()
    }

    /// Fire the clock now, ahead of its deadline.
    pub fn cancel(&self) {
        self.token.cancel.cancel();
    }
}

impl Drop for DeadlineClock {
    fn drop(&mut self) {
        self.token.cancel.cancel();
    }
}

/// One-shot, monotonic cancellation signal with an absolute deadline.
#[derive(Debug, Clone)]
pub struct DeadlineToken {
    deadline: Instant,
    cancel: CancellationToken,
}

impl DeadlineToken {
    /// Absolute instant at which this token fires.
    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the deadline; zero once fired.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        if self.cancel.is_cancelled() {
            return Duration::ZERO;
        }
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Whether the token has fired.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.cancel.is_cancelled() || Instant::now() >= self.deadline
    }

    /// Resolves once the token fires.
    pub async fn fired(&self) {
        // Already past the deadline: return without arming a timer.
        if self.is_fired() {
            return;
        }
        tokio::select! {
            () = tokio::time::sleep_until(self.deadline) => {}
            () = self.cancel.cancelled() => {}
        }
    }

    /// Derive a token bounded by both this one and `limit` from now.
    ///
    /// The child fires at `min(self.deadline(), now + limit)`, and also when
    /// this token is cancelled. Cancelling the child never affects the parent.
    #[must_use]
    pub fn child(&self, limit: Duration) -> Self {
        let local = Instant::now().checked_add(limit).unwrap_or_else(far_future);
        Self {
            deadline: self.deadline.min(local),
            cancel: self.cancel.child_token(),
        }
    }

    /// Fire this token (and its children) now.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

// Stand-in for budgets too large to add to `Instant::now()`.
fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(86400 * 365 * 30)
}
