//! Tests for error types

use std::time::Duration;

use prometheus_deadline_scheduler::core::{FailureKind, SchedulerError, TaskFailure};

#[test]
fn test_invalid_config_error() {
    let err = SchedulerError::InvalidConfig("max_concurrency must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: max_concurrency must be greater than 0"
    );
}

#[test]
fn test_parse_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = SchedulerError::from(json_err);
    assert!(format!("{}", err).starts_with("config parse error:"));
}

#[test]
fn test_runtime_error() {
    let err = SchedulerError::from(std::io::Error::other("no threads"));
    assert_eq!(format!("{}", err), "runtime error: no threads");
}

#[test]
fn test_scheduler_timeout_error() {
    let err = TaskFailure::SchedulerTimeout;
    assert_eq!(format!("{}", err), "scheduler timeout before start");
    assert_eq!(err.kind(), FailureKind::SchedulerTimeout);
}

#[test]
fn test_task_timeout_error() {
    let err = TaskFailure::TaskTimeout {
        budget: Duration::from_millis(100),
        source: None,
    };
    assert_eq!(format!("{}", err), "task timeout after 100ms");
}
