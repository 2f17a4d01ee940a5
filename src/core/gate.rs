//! Admission gate limiting how many tasks execute at once.
//!
//! The gate is a counting semaphore raced against a [`DeadlineToken`]. A
//! worker that is admitted holds a [`GatePermit`] for the whole execution of
//! its task; the permit returns the slot on drop, so every exit path
//! (success, failure, timeout, panic) releases exactly once. A worker whose
//! deadline fires first never holds a slot and releases nothing.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::core::DeadlineToken;

/// Result of racing admission against a deadline.
#[derive(Debug)]
pub enum Admission {
    /// A slot was taken; it is released when the permit is dropped.
    Admitted(GatePermit),
    /// The deadline fired before a slot became free.
    DeadlineFired,
}

/// Internal counters for gate utilization (thread-safe).
#[derive(Debug, Default)]
struct GateCounters {
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    admitted: AtomicU64,
}

/// Bounded-capacity admission gate.
///
/// Cloning is cheap and every clone shares the same slots.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    capacity: usize,
    semaphore: Arc<Semaphore>,
    counters: Arc<GateCounters>,
}

impl AdmissionGate {
    /// Create a gate with `capacity` slots.
    ///
    /// `capacity` must be in `1..=Semaphore::MAX_PERMITS`; the scheduler
    /// validates this before building a gate.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            semaphore: Arc::new(Semaphore::new(capacity)),
            counters: Arc::new(GateCounters::default()),
        }
    }

    /// Take a slot, waiting until one frees or `deadline` fires.
    ///
    /// When both are ready at the same time the deadline wins, so an already
    /// expired caller is never admitted.
    pub async fn try_acquire(&self, deadline: &DeadlineToken) -> Admission {
        let acquired = tokio::select! {
            biased;
            () = deadline.fired() => return Admission::DeadlineFired,
            permit = Arc::clone(&self.semaphore).acquire_owned() => permit,
        };

        match acquired {
            Ok(permit) => {
                let now = self.counters.in_flight.fetch_add(1, Ordering::AcqRel) + 1;
                self.counters.peak_in_flight.fetch_max(now, Ordering::AcqRel);
                self.counters.admitted.fetch_add(1, Ordering::Relaxed);
                Admission::Admitted(GatePermit {
                    _permit: permit,
                    counters: Arc::clone(&self.counters),
                })
            }
            Err(_) => {
                // The semaphore is never closed; treat it like an expired run.
                tracing::error!("admission gate closed while workers were waiting");
                Admission::DeadlineFired
            }
        }
    }

    /// Configured number of slots.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently held.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.counters.in_flight.load(Ordering::Acquire)
    }

    /// Highest number of slots held at once since the gate was created.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.counters.peak_in_flight.load(Ordering::Acquire)
    }

    /// Total successful admissions.
    #[must_use]
    pub fn admitted(&self) -> u64 {
        self.counters.admitted.load(Ordering::Relaxed)
    }
}

/// A held gate slot.
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
    counters: Arc<GateCounters>,
}

impl GatePermit {
    /// Return the slot now. Equivalent to dropping the permit.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.counters.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}
