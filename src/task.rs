//! Task execution framework for the parityflow workflow system.
//!
//! This module provides the core abstractions for executable workflow
//! tasks: the [`Task`] trait, the per-run execution context handed to each
//! task, and the fatal error taxonomy.

// Standard library and external crates
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use miette::Diagnostic;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

// Internal crate modules
use crate::event_bus::Event;
use crate::types::{RunId, TaskId};
use crate::xcom::{XcomError, XcomStore};

/// Core trait defining executable workflow tasks.
///
/// A `Task` represents a single unit of work within a run. Tasks receive a
/// [`TaskContext`] scoped to the current run, perform their work, and hand
/// any value intended for downstream tasks to the per-run exchange.
///
/// # Design Principles
///
/// - **Stateless**: a task instance holds configuration, never run state
/// - **Focused**: one well-defined responsibility per task
/// - **Scoped**: all inter-task communication goes through the run-scoped
///   exchange on the context, never through shared task fields
/// - **Observable**: use [`TaskContext::emit`] for progress messages
///
/// # Examples
///
/// ```rust,no_run
/// use parityflow::task::{Task, TaskContext, TaskError};
/// use async_trait::async_trait;
/// use serde_json::json;
///
/// struct AnswerTask;
///
/// #[async_trait]
/// impl Task for AnswerTask {
///     async fn execute(&self, ctx: TaskContext) -> Result<(), TaskError> {
///         ctx.xcom_push("answer", json!(42)).await?;
///         ctx.emit("answer", "published the answer")?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync {
    /// Execute this task within the given run context.
    async fn execute(&self, ctx: TaskContext) -> Result<(), TaskError>;
}

/// Execution context passed to tasks during a run.
///
/// Carries the task's identity, the identity and logical date of the run it
/// is executing in, a channel for emitting observability events, and the
/// injected per-run key/value exchange capability.
#[derive(Clone, Debug)]
pub struct TaskContext {
    /// Identifier of the task being executed.
    pub task_id: TaskId,
    /// Identifier of the run this execution belongs to.
    pub run_id: RunId,
    /// The schedule instant this run covers.
    pub logical_date: DateTime<Utc>,
    event_sender: flume::Sender<Event>,
    xcom: Arc<dyn XcomStore>,
}

impl TaskContext {
    pub fn new(
        task_id: TaskId,
        run_id: RunId,
        logical_date: DateTime<Utc>,
        event_sender: flume::Sender<Event>,
        xcom: Arc<dyn XcomStore>,
    ) -> Self {
        Self {
            task_id,
            run_id,
            logical_date,
            event_sender,
            xcom,
        }
    }

    /// Emit a task-scoped event enriched with this context's metadata.
    pub fn emit(
        &self,
        scope: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<(), TaskContextError> {
        self.event_sender
            .send(Event::task_message_with_meta(
                self.task_id.as_str(),
                self.run_id.as_str(),
                scope,
                message,
            ))
            .map_err(|_| TaskContextError::EventBusUnavailable)
    }

    /// Publish a value for downstream tasks, scoped to this run and task.
    pub async fn xcom_push(&self, key: &str, value: Value) -> Result<(), TaskError> {
        self.xcom
            .push(&self.run_id, &self.task_id, key, value)
            .await?;
        Ok(())
    }

    /// Read the value `upstream` published under `key` within this run.
    ///
    /// Returns `Ok(None)` when the upstream task has not published the key.
    pub async fn xcom_pull(
        &self,
        upstream: &TaskId,
        key: &str,
    ) -> Result<Option<Value>, TaskError> {
        let value = self.xcom.pull(&self.run_id, upstream, key).await?;
        Ok(value)
    }
}

/// Errors that can occur when using TaskContext methods.
#[derive(Debug, Error, Diagnostic)]
pub enum TaskContextError {
    /// Event could not be sent due to event bus disconnection.
    #[error("failed to emit event: event bus unavailable")]
    #[diagnostic(
        code(parityflow::task::event_bus_unavailable),
        help("The event bus may be disconnected or shut down. Check the run harness.")
    )]
    EventBusUnavailable,
}

/// Errors that can occur during task execution.
///
/// `TaskError` represents fatal errors that abort the current run. The
/// reference host stops at the first failing task and surfaces its id.
#[derive(Debug, Error, Diagnostic)]
pub enum TaskError {
    /// An expected upstream value is absent from the exchange.
    #[error("missing expected input: {what}")]
    #[diagnostic(
        code(parityflow::task::missing_input),
        help("Check that the upstream task ran in this run and published the key.")
    )]
    MissingInput { what: &'static str },

    /// Input validation failed.
    #[error("validation failed: {0}")]
    #[diagnostic(
        code(parityflow::task::validation),
        help("Check the task configuration and the shape of upstream values.")
    )]
    ValidationFailed(String),

    /// Key/value exchange backend error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Xcom(#[from] XcomError),

    /// JSON serialization/deserialization error.
    #[error(transparent)]
    #[diagnostic(code(parityflow::task::serde_json))]
    Serde(#[from] serde_json::Error),

    /// Event bus communication error.
    #[error("event bus error: {0}")]
    #[diagnostic(code(parityflow::task::event_bus))]
    EventBus(#[from] TaskContextError),
}
