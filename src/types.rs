//! Core identity types for the parityflow workflow system.
//!
//! This module defines the identifiers used throughout the crate for
//! naming tasks and runs. These are the domain concepts a host platform
//! keys its bookkeeping on: a [`TaskId`] names one unit of work inside a
//! DAG, and a [`RunId`] names one scheduled execution instance of that DAG.
//!
//! # Examples
//!
//! ```rust
//! use parityflow::types::{RunId, TaskId};
//!
//! let generate: TaskId = "generate_number".into();
//! assert_eq!(generate.as_str(), "generate_number");
//!
//! let run = RunId::from("manual__e4b1");
//! assert_eq!(run.to_string(), "manual__e4b1");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one task within a workflow DAG.
///
/// Task ids must be unique within a DAG; the builder rejects duplicates at
/// compile time. Downstream tasks reference their upstream producers by
/// `TaskId` when pulling values from the per-run key/value exchange, so the
/// id doubles as the scope of every value a task publishes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Developer experience: allow using string literals where a TaskId is expected.
impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifies one execution instance (a "run") of a workflow DAG.
///
/// All values exchanged between tasks are scoped to the run that produced
/// them; two runs of the same DAG never observe each other's values. The
/// reference host derives run ids from the schedule (`scheduled__{ts}`) or
/// mints a `manual__{uuid}` id, but any opaque string a platform assigns
/// works.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RunId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RunId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
