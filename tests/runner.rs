mod common;

use std::sync::{Arc, Mutex};

use parityflow::dag::DagBuilder;
use parityflow::event_bus::{Event, EventBus, MemorySink};
use parityflow::flows::random_number::{
    random_number_checker, CHECK_TASK_ID, GENERATE_TASK_ID,
};
use parityflow::runtimes::{EventBusConfig, LocalRunner, RunnerError, RuntimeConfig};
use parityflow::tasks::Parity;
use parityflow::types::TaskId;
use parityflow::xcom::InMemoryXcom;

use common::{logical_date, FailingTask, RecordingTask};

/// A config that emits nowhere, for tests that only care about control flow.
fn quiet_config() -> RuntimeConfig {
    RuntimeConfig::new(Some("manual__fixed".to_string()))
        .with_event_bus(EventBusConfig::new(vec![]))
}

#[tokio::test]
async fn runs_tasks_in_declared_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let dag = DagBuilder::new("ordering")
        .add_task("third", RecordingTask::new("third", log.clone()))
        .add_task("first", RecordingTask::new("first", log.clone()))
        .add_task("second", RecordingTask::new("second", log.clone()))
        .add_edge("first", "second")
        .add_edge("second", "third")
        .compile()
        .unwrap();

    let runner = LocalRunner::new(dag).with_config(quiet_config());
    let report = runner.run_once(logical_date()).await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    assert_eq!(
        report.completed,
        vec![
            TaskId::from("first"),
            TaskId::from("second"),
            TaskId::from("third")
        ]
    );
    assert_eq!(report.run_id.as_str(), "manual__fixed");
    assert_eq!(report.logical_date, logical_date());
}

#[tokio::test]
async fn checker_flow_classifies_its_generated_value() {
    let dag = random_number_checker().unwrap();
    let runner = LocalRunner::new(dag)
        .with_config(RuntimeConfig::new(Some("manual__fixed".to_string())));

    let memory = MemorySink::new();
    let event_bus = EventBus::with_sink(memory.clone());
    let report = runner
        .run_once_with_bus(logical_date(), &event_bus)
        .await
        .unwrap();
    event_bus.stop_listener().await;

    assert_eq!(
        report.completed,
        vec![TaskId::from(GENERATE_TASK_ID), TaskId::from(CHECK_TASK_ID)]
    );

    let events = memory.snapshot();
    let messages: Vec<&str> = events.iter().map(Event::message).collect();
    let generated = messages
        .iter()
        .find_map(|m| m.strip_prefix("Generated random number: "))
        .expect("generation message emitted");
    let number: i64 = generated.parse().unwrap();
    assert!((1..=100).contains(&number));

    let expected = format!("The number {number} is {}.", Parity::of(number));
    assert!(
        messages.contains(&expected.as_str()),
        "missing {expected:?} in {messages:?}"
    );
}

#[tokio::test]
async fn first_failure_aborts_the_run() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let dag = DagBuilder::new("fails_early")
        .add_task("gate", FailingTask)
        .add_task("after", RecordingTask::new("after", log.clone()))
        .add_edge("gate", "after")
        .compile()
        .unwrap();

    let runner = LocalRunner::new(dag).with_config(quiet_config());
    let err = runner.run_once(logical_date()).await.unwrap_err();

    let RunnerError::Task { task_id, .. } = err;
    assert_eq!(task_id.as_str(), "gate");
    assert!(log.lock().unwrap().is_empty(), "downstream task must not run");
}

/// A config with no run-id override, built directly so the assertion does
/// not depend on `PARITYFLOW_RUN_ID` in the test environment.
fn unpinned_config() -> RuntimeConfig {
    RuntimeConfig {
        run_id: None,
        event_bus: EventBusConfig::new(vec![]),
    }
}

#[tokio::test]
async fn scheduled_dag_derives_scheduled_run_id() {
    let dag = random_number_checker().unwrap();
    let runner = LocalRunner::new(dag).with_config(unpinned_config());

    let report = runner.run_once(logical_date()).await.unwrap();
    assert_eq!(report.run_id.as_str(), "scheduled__2024-06-01T00:00:00Z");
}

#[tokio::test]
async fn unscheduled_dag_mints_a_manual_run_id() {
    let dag = DagBuilder::new("adhoc")
        .add_task("only", common::NoopTask)
        .compile()
        .unwrap();
    let runner = LocalRunner::new(dag).with_config(unpinned_config());

    let report = runner.run_once(logical_date()).await.unwrap();
    assert!(report.run_id.as_str().starts_with("manual__"));
}

#[tokio::test]
async fn runs_share_a_store_but_not_values() {
    let xcom = Arc::new(InMemoryXcom::new());
    let dag = random_number_checker().unwrap();
    let runner = LocalRunner::new(dag).with_xcom_store(xcom.clone());

    let first = RuntimeConfig::new(Some("manual__a".to_string()))
        .with_event_bus(EventBusConfig::new(vec![]));
    let second = RuntimeConfig::new(Some("manual__b".to_string()))
        .with_event_bus(EventBusConfig::new(vec![]));

    let report_a = LocalRunner::new(random_number_checker().unwrap())
        .with_xcom_store(xcom.clone())
        .with_config(first)
        .run_once(logical_date())
        .await
        .unwrap();
    let report_b = runner
        .with_config(second)
        .run_once(logical_date())
        .await
        .unwrap();

    assert_ne!(report_a.run_id, report_b.run_id);
    // One entry per run under the shared store.
    assert_eq!(xcom.len(), 2);

    xcom.purge_run(&report_a.run_id);
    assert_eq!(xcom.len(), 1);
}
