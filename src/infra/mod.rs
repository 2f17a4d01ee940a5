//! Infrastructure adapters that sit next to the scheduler.

pub mod idempotency;

pub use idempotency::{IdempotencyCache, IdempotencyError, OrderRequest, OrderResponse, OrderStatus};
