use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    Task(TaskEvent),
    Diagnostic(DiagnosticEvent),
}

impl Event {
    pub fn task_message(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Event::Task(TaskEvent::new(None, None, scope.into(), message.into()))
    }

    pub fn task_message_with_meta(
        task_id: impl Into<String>,
        run_id: impl Into<String>,
        scope: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Event::Task(TaskEvent::new(
            Some(task_id.into()),
            Some(run_id.into()),
            scope.into(),
            message.into(),
        ))
    }

    pub fn diagnostic(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Event::Diagnostic(DiagnosticEvent {
            scope: scope.into(),
            message: message.into(),
        })
    }

    pub fn scope_label(&self) -> &str {
        match self {
            Event::Task(task) => task.scope(),
            Event::Diagnostic(diag) => diag.scope(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Event::Task(task) => task.message(),
            Event::Diagnostic(diag) => diag.message(),
        }
    }

    /// Convert the event to a structured JSON value with a normalized schema.
    ///
    /// ```json
    /// {
    ///   "type": "task" | "diagnostic",
    ///   "scope": "scope_label",
    ///   "message": "event_message",
    ///   "timestamp": "2024-01-01T00:00:00Z",
    ///   "metadata": { /* variant-specific fields */ }
    /// }
    /// ```
    pub fn to_json_value(&self) -> Value {
        use serde_json::json;

        let (event_type, metadata) = match self {
            Event::Task(task) => {
                let mut meta = serde_json::Map::new();
                if let Some(task_id) = task.task_id() {
                    meta.insert("task_id".to_string(), json!(task_id));
                }
                if let Some(run_id) = task.run_id() {
                    meta.insert("run_id".to_string(), json!(run_id));
                }
                ("task", Value::Object(meta))
            }
            Event::Diagnostic(_) => ("diagnostic", Value::Object(serde_json::Map::new())),
        };

        json!({
            "type": event_type,
            "scope": self.scope_label(),
            "message": self.message(),
            "timestamp": Utc::now().to_rfc3339(),
            "metadata": metadata,
        })
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_json_value())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Task(task) => match (task.task_id(), task.run_id()) {
                (Some(id), Some(run)) => write!(f, "[{id}@{run}] {}", task.message()),
                (Some(id), None) => write!(f, "[{id}] {}", task.message()),
                (None, _) => write!(f, "{}", task.message()),
            },
            Event::Diagnostic(diag) => write!(f, "{}", diag.message()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskEvent {
    task_id: Option<String>,
    run_id: Option<String>,
    scope: String,
    message: String,
}

impl TaskEvent {
    pub fn new(
        task_id: Option<String>,
        run_id: Option<String>,
        scope: String,
        message: String,
    ) -> Self {
        Self {
            task_id,
            run_id,
            scope,
            message,
        }
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticEvent {
    scope: String,
    message: String,
}

impl DiagnosticEvent {
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
