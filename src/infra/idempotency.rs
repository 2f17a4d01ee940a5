//! Idempotent order creation keyed by client request id.
//!
//! Repeated submissions of the same `clientRequestId` return the order created
//! by the first one. The cache is a single map behind one mutex; it is never
//! evicted or persisted.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced while handling an order request.
#[derive(Debug, Error)]
pub enum IdempotencyError {
    /// Request is missing its client request id.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Request body is not valid JSON.
    #[error("invalid request body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Order creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Caller-chosen idempotency key.
    #[serde(default)]
    pub client_request_id: String,
}

/// Whether the response created a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// First request for this key.
    New,
    /// Key seen before; the original order id is returned.
    Duplicate,
}

/// Order creation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Order identifier.
    pub order_id: String,
    /// New or duplicate.
    pub status: OrderStatus,
}

/// Client request id to order id cache.
#[derive(Debug, Default)]
pub struct IdempotencyCache {
    orders: Mutex<HashMap<String, String>>,
}

impl IdempotencyCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the order for `req`, or return the one created earlier.
    ///
    /// # Errors
    ///
    /// Returns `IdempotencyError::InvalidRequest` if the request id is empty.
    pub fn handle(&self, req: &OrderRequest) -> Result<OrderResponse, IdempotencyError> {
        let key = req.client_request_id.as_str();
        if key.is_empty() {
            return Err(IdempotencyError::InvalidRequest(
                "clientRequestId is required".into(),
            ));
        }

        let mut orders = self.orders.lock();
        if let Some(existing) = orders.get(key) {
            tracing::debug!(client_request_id = key, order_id = %existing, "duplicate order request");
            return Ok(OrderResponse {
                order_id: existing.clone(),
                status: OrderStatus::Duplicate,
            });
        }

        let order_id = format!("ORD-{}", Uuid::new_v4().simple());
        orders.insert(key.to_string(), order_id.clone());
        tracing::info!(client_request_id = key, order_id = %order_id, "order created");
        Ok(OrderResponse {
            order_id,
            status: OrderStatus::New,
        })
    }

    /// Handle a JSON request body and return the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns `IdempotencyError::Parse` for malformed bodies and
    /// `IdempotencyError::InvalidRequest` for a missing request id.
    pub fn handle_json(&self, body: &str) -> Result<String, IdempotencyError> {
        let req: OrderRequest = serde_json::from_str(body)?;
        let resp = self.handle(&req)?;
        Ok(serde_json::to_string(&resp)?)
    }

    /// Number of distinct request ids seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.lock().len()
    }

    /// True when no order has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.lock().is_empty()
    }
}
