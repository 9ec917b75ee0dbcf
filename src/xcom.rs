//! Per-run key/value exchange between tasks.
//!
//! The exchange ("XCom", after the host platform convention the crate
//! targets) is the only channel through which one task hands a value to a
//! downstream task. It is owned by the host platform, so the crate models
//! it as an injected capability: the [`XcomStore`] trait. Every entry is
//! scoped by the run that produced it, the producing task, and a named key.
//!
//! [`InMemoryXcom`] is the reference implementation used by the local
//! runner and by tests. It is process-local and volatile; a platform
//! backing this trait with durable storage slots in without touching any
//! task code.

use async_trait::async_trait;
use miette::Diagnostic;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::types::{RunId, TaskId};

/// Capability trait for the per-run key/value exchange.
///
/// Writes are scoped to `(run, producing task, key)`. Reads name the
/// producing task explicitly, which is how a consumer declares *whose*
/// value it depends on. Reads are non-destructive and a missing entry is
/// `Ok(None)`, not an error: absence is a contract question for the
/// caller, backend failure is the error case.
#[async_trait]
pub trait XcomStore: Send + Sync + fmt::Debug {
    /// Publish `value` under `key`, scoped to `run` and the producing `task`.
    ///
    /// Re-publishing under the same key overwrites (last write wins).
    async fn push(
        &self,
        run: &RunId,
        task: &TaskId,
        key: &str,
        value: Value,
    ) -> Result<(), XcomError>;

    /// Read the value `task` published under `key` within `run`, if any.
    async fn pull(
        &self,
        run: &RunId,
        task: &TaskId,
        key: &str,
    ) -> Result<Option<Value>, XcomError>;
}

/// Errors surfaced by an exchange backend.
#[derive(Debug, Error, Diagnostic)]
pub enum XcomError {
    /// The backing store rejected or failed the operation.
    #[error("xcom backend error: {message}")]
    #[diagnostic(
        code(parityflow::xcom::backend),
        help("The exchange backend is injected by the host; check its connectivity and logs.")
    )]
    Backend { message: String },
}

impl XcomError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct XcomKey {
    run: RunId,
    task: TaskId,
    key: String,
}

/// Process-local reference implementation of [`XcomStore`].
///
/// Entries live behind a `parking_lot::RwLock`; the store is cheap to share
/// via `Arc` across the tasks of a run. Run-scoped entries can be discarded
/// with [`purge_run`](Self::purge_run) once a run's bookkeeping is
/// garbage-collected.
#[derive(Debug, Default)]
pub struct InMemoryXcom {
    entries: RwLock<FxHashMap<XcomKey, Value>>,
}

impl InMemoryXcom {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry belonging to `run`.
    pub fn purge_run(&self, run: &RunId) {
        self.entries.write().retain(|k, _| &k.run != run);
    }

    /// Number of live entries across all runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl XcomStore for InMemoryXcom {
    async fn push(
        &self,
        run: &RunId,
        task: &TaskId,
        key: &str,
        value: Value,
    ) -> Result<(), XcomError> {
        let entry = XcomKey {
            run: run.clone(),
            task: task.clone(),
            key: key.to_string(),
        };
        self.entries.write().insert(entry, value);
        Ok(())
    }

    async fn pull(
        &self,
        run: &RunId,
        task: &TaskId,
        key: &str,
    ) -> Result<Option<Value>, XcomError> {
        let entry = XcomKey {
            run: run.clone(),
            task: task.clone(),
            key: key.to_string(),
        };
        Ok(self.entries.read().get(&entry).cloned())
    }
}
