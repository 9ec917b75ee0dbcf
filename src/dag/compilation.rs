//! DAG compilation logic and structural validation.

use miette::Diagnostic;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use super::Dag;
use super::builder::DagBuilder;
use crate::types::TaskId;

/// Errors reported when a DAG declaration fails structural validation.
#[derive(Debug, Error, Diagnostic)]
pub enum DagCompileError {
    /// The builder holds no tasks at all.
    #[error("dag '{dag_id}' has no tasks")]
    #[diagnostic(
        code(parityflow::dag::empty),
        help("Register at least one task with add_task before compiling.")
    )]
    Empty { dag_id: String },

    /// The same task id was registered more than once.
    #[error("duplicate task id '{task_id}' in dag '{dag_id}'")]
    #[diagnostic(
        code(parityflow::dag::duplicate_task),
        help("Task ids must be unique within a DAG.")
    )]
    DuplicateTask { dag_id: String, task_id: TaskId },

    /// An edge endpoint names a task that was never registered.
    #[error("edge references unknown task '{task_id}' in dag '{dag_id}'")]
    #[diagnostic(
        code(parityflow::dag::unknown_task),
        help("Every edge endpoint must be registered with add_task.")
    )]
    UnknownTask { dag_id: String, task_id: TaskId },

    /// The declared edges contain a dependency cycle.
    #[error("dag '{dag_id}' contains a cycle involving: {remaining}")]
    #[diagnostic(
        code(parityflow::dag::cycle),
        help("Ordering edges must form a directed acyclic graph.")
    )]
    Cycle { dag_id: String, remaining: String },
}

impl DagBuilder {
    /// Compiles the declaration into an immutable [`Dag`].
    ///
    /// Validation performed, in order:
    /// - at least one task is registered
    /// - no task id was registered twice
    /// - every edge endpoint names a registered task
    /// - the edges are acyclic
    ///
    /// On success the returned `Dag` carries a deterministic topological
    /// order (ties broken by task id) that executors walk.
    pub fn compile(self) -> Result<Dag, DagCompileError> {
        let DagBuilder {
            id,
            description,
            doc,
            schedule,
            tasks,
            edges,
            duplicates,
        } = self;

        if let Some(task_id) = duplicates.into_iter().next() {
            return Err(DagCompileError::DuplicateTask { dag_id: id, task_id });
        }
        if tasks.is_empty() {
            return Err(DagCompileError::Empty { dag_id: id });
        }

        let edges = dedup_edges(edges);
        if let Some(task_id) = first_unknown_endpoint(&tasks, &edges) {
            return Err(DagCompileError::UnknownTask { dag_id: id, task_id });
        }

        let order = topological_order(&tasks, &edges).map_err(|remaining| {
            DagCompileError::Cycle {
                dag_id: id.clone(),
                remaining: remaining
                    .iter()
                    .map(TaskId::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        })?;

        Ok(Dag::from_parts(
            id,
            description,
            doc,
            schedule,
            tasks,
            edges,
            order,
        ))
    }
}

/// Repeated identical edges add no ordering information; drop them so the
/// indegree bookkeeping below stays consistent.
fn dedup_edges(edges: FxHashMap<TaskId, Vec<TaskId>>) -> FxHashMap<TaskId, Vec<TaskId>> {
    edges
        .into_iter()
        .map(|(from, tos)| {
            let mut seen = FxHashSet::default();
            let tos = tos.into_iter().filter(|to| seen.insert(to.clone())).collect();
            (from, tos)
        })
        .collect()
}

fn first_unknown_endpoint(
    tasks: &FxHashMap<TaskId, std::sync::Arc<dyn crate::task::Task>>,
    edges: &FxHashMap<TaskId, Vec<TaskId>>,
) -> Option<TaskId> {
    let mut unknown: Vec<&TaskId> = edges
        .iter()
        .flat_map(|(from, tos)| std::iter::once(from).chain(tos.iter()))
        .filter(|id| !tasks.contains_key(*id))
        .collect();
    // Deterministic error selection regardless of map iteration order.
    unknown.sort();
    unknown.first().map(|id| (*id).clone())
}

/// Kahn's algorithm with the ready set kept sorted by task id, so the
/// resulting order is stable across runs and map layouts.
fn topological_order(
    tasks: &FxHashMap<TaskId, std::sync::Arc<dyn crate::task::Task>>,
    edges: &FxHashMap<TaskId, Vec<TaskId>>,
) -> Result<Vec<TaskId>, Vec<TaskId>> {
    let mut indegree: FxHashMap<&TaskId, usize> = tasks.keys().map(|id| (id, 0)).collect();
    for tos in edges.values() {
        for to in tos {
            if let Some(degree) = indegree.get_mut(to) {
                *degree += 1;
            }
        }
    }

    let mut ready: Vec<&TaskId> = indegree
        .iter()
        .filter_map(|(id, degree)| (*degree == 0).then_some(*id))
        .collect();
    ready.sort();

    let mut order = Vec::with_capacity(tasks.len());
    while !ready.is_empty() {
        let next = ready.remove(0);
        order.push(next.clone());
        if let Some(tos) = edges.get(next) {
            for to in tos {
                if let Some(degree) = indegree.get_mut(to) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(to);
                    }
                }
            }
            ready.sort();
        }
    }

    if order.len() == tasks.len() {
        Ok(order)
    } else {
        let mut remaining: Vec<TaskId> = tasks
            .keys()
            .filter(|id| !order.contains(id))
            .cloned()
            .collect();
        remaining.sort();
        Err(remaining)
    }
}
