//! Tests for tokio spawner utilities and report models

use std::time::Duration;

use prometheus_deadline_scheduler::config::SchedulerConfig;
use prometheus_deadline_scheduler::core::{task_fn, FailureKind, Scheduler, Spawn};
use prometheus_deadline_scheduler::runtime::{OutcomeStatus, RunReport, TokioSpawner};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_spawn() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());
    let handle = spawner.spawn(async move { 123 });
    assert_eq!(handle.await.expect("join"), 123);
}

#[tokio::test]
async fn test_default_spawner_uses_ambient_runtime() {
    let spawner = TokioSpawner::default();
    let handle = spawner.spawn(async { "ok" });
    assert_eq!(handle.await.expect("join"), "ok");
}

#[tokio::test]
async fn test_run_report_from_results() {
    let scheduler = Scheduler::new(
        SchedulerConfig::new()
            .with_max_concurrency(2)
            .with_per_task_timeout(Duration::from_secs(1))
            .with_overall_timeout(Duration::from_secs(1)),
    )
    .unwrap();

    let tasks = vec![
        task_fn(|_token| async { Ok(()) }),
        task_fn(|_token| async { Err(anyhow::anyhow!("non-2xx status code: 404")) }),
    ];
    let results = scheduler.run(tasks).await;
    let report = RunReport::from_results(&results);

    assert_eq!(report.run_id, results.run_id().to_string());
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.outcomes[0].status, OutcomeStatus::Success);
    assert_eq!(report.outcomes[1].status, OutcomeStatus::Failed);
    assert_eq!(report.outcomes[1].kind, Some(FailureKind::Task));
    assert_eq!(
        report.outcomes[1].error.as_deref(),
        Some("non-2xx status code: 404")
    );

    let json = report.to_json_pretty().unwrap();
    assert!(json.contains("\"status\": \"failed\""));
    report.log();
}
