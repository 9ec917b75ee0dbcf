//! DAG definition and compilation for workflow execution.
//!
//! The main entry point is [`DagBuilder`], a fluent builder collecting
//! tasks, ordering edges, and scheduling metadata, which
//! [`compile`](DagBuilder::compile)s into an immutable [`Dag`]. Compilation
//! validates the declaration (no duplicates, no dangling edges, no cycles)
//! and fixes a deterministic topological order. Whoever executes the DAG,
//! the bundled [`LocalRunner`](crate::runtimes::LocalRunner) or a real
//! platform, walks that order; a downstream task can therefore never
//! observe a run in which its upstream has not completed.
//!
//! # Quick Start
//!
//! ```
//! use parityflow::dag::DagBuilder;
//! use parityflow::task::{Task, TaskContext, TaskError};
//! use async_trait::async_trait;
//!
//! struct NoopTask;
//!
//! #[async_trait]
//! impl Task for NoopTask {
//!     async fn execute(&self, _ctx: TaskContext) -> Result<(), TaskError> {
//!         Ok(())
//!     }
//! }
//!
//! let dag = DagBuilder::new("example")
//!     .add_task("first", NoopTask)
//!     .add_task("second", NoopTask)
//!     .add_edge("first", "second")
//!     .compile()
//!     .unwrap();
//!
//! assert_eq!(dag.order().len(), 2);
//! assert_eq!(dag.order()[0].as_str(), "first");
//! ```

mod builder;
mod compilation;

pub use builder::DagBuilder;
pub use compilation::DagCompileError;

use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::schedule::Schedule;
use crate::task::Task;
use crate::types::TaskId;

/// An immutable, validated workflow definition.
///
/// Produced by [`DagBuilder::compile`]; carries the task registry, the
/// declared ordering edges, the optional schedule, and the topological
/// order fixed at compile time.
pub struct Dag {
    id: String,
    description: Option<String>,
    doc: Option<String>,
    schedule: Option<Schedule>,
    tasks: FxHashMap<TaskId, Arc<dyn Task>>,
    edges: FxHashMap<TaskId, Vec<TaskId>>,
    order: Vec<TaskId>,
}

impl Dag {
    pub(crate) fn from_parts(
        id: String,
        description: Option<String>,
        doc: Option<String>,
        schedule: Option<Schedule>,
        tasks: FxHashMap<TaskId, Arc<dyn Task>>,
        edges: FxHashMap<TaskId, Vec<TaskId>>,
        order: Vec<TaskId>,
    ) -> Self {
        Self {
            id,
            description,
            doc,
            schedule,
            tasks,
            edges,
            order,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Markdown documentation attached to the definition.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    pub fn tasks(&self) -> &FxHashMap<TaskId, Arc<dyn Task>> {
        &self.tasks
    }

    pub fn edges(&self) -> &FxHashMap<TaskId, Vec<TaskId>> {
        &self.edges
    }

    /// The deterministic topological order fixed at compile time.
    pub fn order(&self) -> &[TaskId] {
        &self.order
    }

    pub fn task(&self, id: &TaskId) -> Option<&Arc<dyn Task>> {
        self.tasks.get(id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Tasks in execution order, paired with their ids.
    pub fn ordered_tasks(&self) -> impl Iterator<Item = (&TaskId, &Arc<dyn Task>)> {
        self.order
            .iter()
            .filter_map(|id| self.tasks.get(id).map(|task| (id, task)))
    }
}

impl std::fmt::Debug for Dag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dag")
            .field("id", &self.id)
            .field("tasks", &self.order)
            .field("schedule", &self.schedule)
            .finish_non_exhaustive()
    }
}
