//! Reference host for executing one run of a compiled DAG.
//!
//! `LocalRunner` is the in-process stand-in for the platform that would
//! normally own execution. It walks the topological order the DAG fixed at
//! compile time, sequentially, handing every task a context scoped to the
//! same run and the same injected [`XcomStore`]. It is deliberately not a
//! scheduler: there is no queueing, no retry, no concurrency. The single
//! guarantee it upholds is the ordering declaration, so a downstream task
//! always observes its upstream's value from the same run.

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

use super::runtime_config::{RuntimeConfig, SinkConfig};
use crate::dag::Dag;
use crate::event_bus::{EventBus, EventSink, MemorySink, StdOutSink};
use crate::task::{TaskContext, TaskError};
use crate::types::{RunId, TaskId};
use crate::utils::id_generator::IdGenerator;
use crate::xcom::{InMemoryXcom, XcomStore};

/// Outcome of one completed run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub run_id: RunId,
    pub logical_date: DateTime<Utc>,
    /// Tasks in the order they completed.
    pub completed: Vec<TaskId>,
}

/// Errors surfaced while driving a run.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// A task failed; the run stops at the first failure.
    #[error("task '{task_id}' failed")]
    #[diagnostic(code(parityflow::runner::task_failed))]
    Task {
        task_id: TaskId,
        #[source]
        #[diagnostic_source]
        source: TaskError,
    },
}

/// Sequential executor for a compiled [`Dag`].
///
/// # Examples
///
/// ```rust,no_run
/// use chrono::Utc;
/// use parityflow::flows::random_number::random_number_checker;
/// use parityflow::runtimes::LocalRunner;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dag = random_number_checker()?;
/// let runner = LocalRunner::new(dag);
/// let report = runner.run_once(Utc::now()).await?;
/// assert_eq!(report.completed.len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct LocalRunner {
    dag: Dag,
    config: RuntimeConfig,
    xcom: Arc<dyn XcomStore>,
}

impl LocalRunner {
    #[must_use]
    pub fn new(dag: Dag) -> Self {
        Self {
            dag,
            config: RuntimeConfig::default(),
            xcom: Arc::new(InMemoryXcom::new()),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject the exchange capability; defaults to [`InMemoryXcom`].
    #[must_use]
    pub fn with_xcom_store(mut self, xcom: Arc<dyn XcomStore>) -> Self {
        self.xcom = xcom;
        self
    }

    pub fn dag(&self) -> &Dag {
        &self.dag
    }

    /// Execute one run against a bus built from the runtime configuration.
    pub async fn run_once(&self, logical_date: DateTime<Utc>) -> Result<RunReport, RunnerError> {
        let event_bus = build_event_bus(&self.config);
        let result = self.run_once_with_bus(logical_date, &event_bus).await;
        event_bus.stop_listener().await;
        result
    }

    /// Execute one run, emitting events through a caller-owned bus.
    ///
    /// The caller keeps ownership of the bus and its sinks; the listener is
    /// started if it is not running yet and is left running afterwards.
    #[instrument(skip(self, event_bus), fields(dag = %self.dag.id()))]
    pub async fn run_once_with_bus(
        &self,
        logical_date: DateTime<Utc>,
        event_bus: &EventBus,
    ) -> Result<RunReport, RunnerError> {
        event_bus.listen_for_events();
        let run_id = self.resolve_run_id(logical_date);
        let sender = event_bus.get_sender();

        tracing::info!(run = %run_id, %logical_date, "starting run");
        let mut completed = Vec::with_capacity(self.dag.task_count());
        for (task_id, task) in self.dag.ordered_tasks() {
            tracing::debug!(task = %task_id, run = %run_id, "executing task");
            let ctx = TaskContext::new(
                task_id.clone(),
                run_id.clone(),
                logical_date,
                sender.clone(),
                self.xcom.clone(),
            );
            task.execute(ctx).await.map_err(|source| {
                tracing::error!(task = %task_id, run = %run_id, error = %source, "task failed");
                RunnerError::Task {
                    task_id: task_id.clone(),
                    source,
                }
            })?;
            completed.push(task_id.clone());
        }
        tracing::info!(run = %run_id, tasks = completed.len(), "run complete");

        Ok(RunReport {
            run_id,
            logical_date,
            completed,
        })
    }

    fn resolve_run_id(&self, logical_date: DateTime<Utc>) -> RunId {
        if let Some(run_id) = &self.config.run_id {
            return RunId::new(run_id.clone());
        }
        let ids = IdGenerator::new();
        if self.dag.schedule().is_some() {
            ids.scheduled_run_id(logical_date)
        } else {
            ids.manual_run_id()
        }
    }
}

fn build_event_bus(config: &RuntimeConfig) -> EventBus {
    let sinks: Vec<Box<dyn EventSink>> = config
        .event_bus
        .sinks()
        .iter()
        .map(|sink| match sink {
            SinkConfig::StdOut => Box::new(StdOutSink::default()) as Box<dyn EventSink>,
            SinkConfig::Memory => Box::new(MemorySink::new()) as Box<dyn EventSink>,
        })
        .collect();
    EventBus::with_sinks(sinks)
}
