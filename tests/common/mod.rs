#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Arc, Mutex};

use parityflow::event_bus::{EventBus, MemorySink};
use parityflow::task::{Task, TaskContext, TaskError};
use parityflow::types::{RunId, TaskId};
use parityflow::xcom::InMemoryXcom;

pub const TEST_RUN_ID: &str = "manual__test";

pub fn logical_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

/// Context wired to a fresh memory-sinked bus and a fresh in-memory store.
pub fn make_ctx(task_id: &str) -> (TaskContext, EventBus, MemorySink, Arc<InMemoryXcom>) {
    let memory = MemorySink::new();
    let event_bus = EventBus::with_sink(memory.clone());
    event_bus.listen_for_events();
    let xcom = Arc::new(InMemoryXcom::new());
    let ctx = ctx_with(task_id, TEST_RUN_ID, &event_bus, xcom.clone());
    (ctx, event_bus, memory, xcom)
}

pub fn ctx_with(
    task_id: &str,
    run_id: &str,
    event_bus: &EventBus,
    xcom: Arc<InMemoryXcom>,
) -> TaskContext {
    TaskContext::new(
        TaskId::from(task_id),
        RunId::from(run_id),
        logical_date(),
        event_bus.get_sender(),
        xcom,
    )
}

pub struct NoopTask;

#[async_trait]
impl Task for NoopTask {
    async fn execute(&self, _ctx: TaskContext) -> Result<(), TaskError> {
        Ok(())
    }
}

/// Appends its name to a shared log when executed.
pub struct RecordingTask {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingTask {
    pub fn new(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { name, log }
    }
}

#[async_trait]
impl Task for RecordingTask {
    async fn execute(&self, _ctx: TaskContext) -> Result<(), TaskError> {
        self.log.lock().unwrap().push(self.name.to_string());
        Ok(())
    }
}

pub struct FailingTask;

#[async_trait]
impl Task for FailingTask {
    async fn execute(&self, _ctx: TaskContext) -> Result<(), TaskError> {
        Err(TaskError::ValidationFailed("boom".to_string()))
    }
}
