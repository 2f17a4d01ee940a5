//! Tests for configuration validation

use std::time::Duration;

use prometheus_deadline_scheduler::config::{SchedulerConfig, SchedulerSettings};
use prometheus_deadline_scheduler::core::SchedulerError;

#[test]
fn test_scheduler_config_validation() {
    let valid = SchedulerConfig {
        max_concurrency: 2,
        per_task_timeout: Duration::from_secs(1),
        overall_timeout: Duration::from_secs(1),
    };
    assert!(valid.validate().is_ok());
}

#[test]
fn test_scheduler_config_invalid_concurrency() {
    let invalid = SchedulerConfig::new().with_max_concurrency(0);
    assert!(matches!(
        invalid.validate(),
        Err(SchedulerError::InvalidConfig(_))
    ));
}

#[test]
fn test_scheduler_config_concurrency_above_gate_limit() {
    let invalid = SchedulerConfig::new().with_max_concurrency(usize::MAX);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_scheduler_config_zero_timeouts_are_valid() {
    let cfg = SchedulerConfig::new()
        .with_per_task_timeout(Duration::ZERO)
        .with_overall_timeout(Duration::ZERO);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_scheduler_config_defaults() {
    let cfg = SchedulerConfig::default();
    assert_eq!(cfg.max_concurrency, 3);
    assert_eq!(cfg.per_task_timeout, Duration::from_secs(2));
    assert_eq!(cfg.overall_timeout, Duration::from_secs(2));
}

#[test]
fn test_scheduler_config_from_json() {
    let json = r#"{
        "max_concurrency": 4,
        "per_task_timeout_ms": 1000,
        "overall_timeout_ms": 3000
    }"#;

    let config = SchedulerConfig::from_json_str(json).expect("valid config");
    assert_eq!(config.max_concurrency, 4);
    assert_eq!(config.per_task_timeout, Duration::from_secs(1));
    assert_eq!(config.overall_timeout, Duration::from_secs(3));
}

#[test]
fn test_scheduler_config_from_json_negative_duration() {
    let json = r#"{
        "max_concurrency": 4,
        "per_task_timeout_ms": -5,
        "overall_timeout_ms": 3000
    }"#;

    let err = SchedulerConfig::from_json_str(json).unwrap_err();
    assert!(err.to_string().contains("per_task_timeout_ms must not be negative"));
}

#[test]
fn test_scheduler_config_from_json_negative_concurrency() {
    let json = r#"{
        "max_concurrency": -1,
        "per_task_timeout_ms": 10,
        "overall_timeout_ms": 10
    }"#;
    assert!(SchedulerConfig::from_json_str(json).is_err());
}

#[test]
fn test_scheduler_config_from_json_missing_field() {
    let json = r#"{ "max_concurrency": 2 }"#;
    assert!(matches!(
        SchedulerConfig::from_json_str(json),
        Err(SchedulerError::Parse(_))
    ));
}

#[test]
fn test_settings_conversion() {
    let settings = SchedulerSettings {
        max_concurrency: 5,
        per_task_timeout_ms: 250,
        overall_timeout_ms: 0,
    };
    let cfg = SchedulerConfig::try_from(settings.clone()).unwrap();
    assert_eq!(cfg.overall_timeout, Duration::ZERO);
    assert_eq!(SchedulerSettings::from(cfg), settings);
}
