//! Tests for the idempotent order cache

use std::sync::Arc;

use prometheus_deadline_scheduler::infra::{
    IdempotencyCache, IdempotencyError, OrderRequest, OrderResponse, OrderStatus,
};

fn request(id: &str) -> OrderRequest {
    OrderRequest {
        client_request_id: id.to_string(),
    }
}

#[test]
fn test_first_request_creates_order() {
    let cache = IdempotencyCache::new();
    let resp = cache.handle(&request("req-1")).unwrap();
    assert_eq!(resp.status, OrderStatus::New);
    assert!(resp.order_id.starts_with("ORD-"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_repeat_request_is_duplicate() {
    let cache = IdempotencyCache::new();
    let first = cache.handle(&request("req-1")).unwrap();
    let second = cache.handle(&request("req-1")).unwrap();
    assert_eq!(second.status, OrderStatus::Duplicate);
    assert_eq!(second.order_id, first.order_id);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_empty_request_id_rejected() {
    let cache = IdempotencyCache::new();
    assert!(matches!(
        cache.handle(&request("")),
        Err(IdempotencyError::InvalidRequest(_))
    ));
    assert!(cache.is_empty());
}

#[test]
fn test_request_ids_are_matched_exactly() {
    let cache = IdempotencyCache::new();
    let plain = cache.handle(&request("abc")).unwrap();
    let padded = cache.handle(&request(" abc ")).unwrap();

    assert_eq!(padded.status, OrderStatus::New);
    assert_ne!(padded.order_id, plain.order_id);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_whitespace_request_id_is_a_key() {
    let cache = IdempotencyCache::new();
    let first = cache.handle(&request("   ")).unwrap();
    let second = cache.handle(&request("   ")).unwrap();

    assert_eq!(first.status, OrderStatus::New);
    assert_eq!(second.status, OrderStatus::Duplicate);
    assert_eq!(second.order_id, first.order_id);
}

#[test]
fn test_json_round_trip() {
    let cache = IdempotencyCache::new();
    let body = cache.handle_json(r#"{"clientRequestId":"abc"}"#).unwrap();
    let resp: OrderResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(resp.status, OrderStatus::New);
    assert!(body.contains("\"orderId\""));
    assert!(body.contains("\"status\":\"new\""));

    let again = cache.handle_json(r#"{"clientRequestId":"abc"}"#).unwrap();
    assert!(again.contains("\"status\":\"duplicate\""));
}

#[test]
fn test_json_errors() {
    let cache = IdempotencyCache::new();
    assert!(matches!(
        cache.handle_json("not json"),
        Err(IdempotencyError::Parse(_))
    ));
    assert!(matches!(
        cache.handle_json("{}"),
        Err(IdempotencyError::InvalidRequest(_))
    ));
}

#[test]
fn test_concurrent_duplicates_share_one_order() {
    let cache = Arc::new(IdempotencyCache::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || cache.handle(&request("same")).unwrap())
        })
        .collect();

    let responses: Vec<OrderResponse> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let new_count = responses
        .iter()
        .filter(|r| r.status == OrderStatus::New)
        .count();
    assert_eq!(new_count, 1);
    assert!(responses.iter().all(|r| r.order_id == responses[0].order_id));
}
