//! DagBuilder implementation for constructing workflow definitions.
//!
//! This module contains the main DagBuilder type and its fluent API for
//! collecting tasks, ordering edges, and scheduling metadata before
//! compiling into an immutable [`Dag`](super::Dag).

use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::schedule::Schedule;
use crate::task::Task;
use crate::types::TaskId;

/// Builder for workflow definitions with a fluent API.
///
/// `DagBuilder` collects the pieces of a DAG declaration and defers all
/// validation to [`compile`](Self::compile), which rejects empty graphs,
/// duplicate task ids, edges naming unregistered tasks, and cycles.
///
/// # Examples
///
/// ```
/// use parityflow::dag::DagBuilder;
/// # use parityflow::task::{Task, TaskContext, TaskError};
/// # struct MyTask;
/// # #[async_trait::async_trait]
/// # impl Task for MyTask {
/// #     async fn execute(&self, _: TaskContext) -> Result<(), TaskError> { Ok(()) }
/// # }
///
/// let dag = DagBuilder::new("two_step")
///     .description("A two step chain")
///     .add_task("produce", MyTask)
///     .add_task("consume", MyTask)
///     .add_edge("produce", "consume")
///     .compile()
///     .unwrap();
/// assert_eq!(dag.id(), "two_step");
/// ```
pub struct DagBuilder {
    pub(super) id: String,
    pub(super) description: Option<String>,
    pub(super) doc: Option<String>,
    pub(super) schedule: Option<Schedule>,
    pub(super) tasks: FxHashMap<TaskId, Arc<dyn Task>>,
    pub(super) edges: FxHashMap<TaskId, Vec<TaskId>>,
    pub(super) duplicates: Vec<TaskId>,
}

impl DagBuilder {
    /// Creates a new builder for a DAG with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            doc: None,
            schedule: None,
            tasks: FxHashMap::default(),
            edges: FxHashMap::default(),
            duplicates: Vec::new(),
        }
    }

    /// One-line human description of the workflow.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Markdown documentation attached to the definition.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Declare the recurring trigger a host should drive this DAG with.
    #[must_use]
    pub fn schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Registers a task under a unique id.
    ///
    /// Registering the same id twice is recorded and rejected at compile
    /// time; the later registration wins in the registry until then.
    #[must_use]
    pub fn add_task(mut self, id: impl Into<TaskId>, task: impl Task + 'static) -> Self {
        let id = id.into();
        if self.tasks.insert(id.clone(), Arc::new(task)).is_some() {
            tracing::warn!(task = %id, dag = %self.id, "duplicate task registration");
            self.duplicates.push(id);
        }
        self
    }

    /// Declares that `to` runs only after `from` completed within a run.
    ///
    /// Multiple edges from the same task create fan-out, multiple edges to
    /// the same task create fan-in. Repeating an identical edge is
    /// harmless; compilation deduplicates it.
    #[must_use]
    pub fn add_edge(mut self, from: impl Into<TaskId>, to: impl Into<TaskId>) -> Self {
        self.edges.entry(from.into()).or_default().push(to.into());
        self
    }
}
