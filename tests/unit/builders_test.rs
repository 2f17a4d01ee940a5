//! Tests for scheduler builders

use std::time::Duration;

use prometheus_deadline_scheduler::builders::{build_scheduler, build_scheduler_from_json};
use prometheus_deadline_scheduler::config::SchedulerConfig;
use prometheus_deadline_scheduler::runtime::TokioSpawner;

#[test]
fn test_build_scheduler_rejects_invalid_config() {
    let cfg = SchedulerConfig::new().with_max_concurrency(0);
    assert!(build_scheduler(&cfg, TokioSpawner::default()).is_err());
}

#[test]
fn test_build_scheduler_keeps_config() {
    let cfg = SchedulerConfig::new()
        .with_max_concurrency(7)
        .with_overall_timeout(Duration::from_millis(900));
    let scheduler = build_scheduler(&cfg, TokioSpawner::default()).expect("valid config");
    assert_eq!(scheduler.config(), &cfg);
}

#[test]
fn test_build_scheduler_from_json() {
    let scheduler = build_scheduler_from_json(
        r#"{"max_concurrency": 2, "per_task_timeout_ms": 100, "overall_timeout_ms": 500}"#,
    )
    .expect("valid json");
    assert_eq!(scheduler.config().max_concurrency, 2);
}
