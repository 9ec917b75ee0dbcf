//! Parity classifier task.

use async_trait::async_trait;
use std::fmt;

use crate::task::{Task, TaskContext, TaskError};
use crate::tasks::generate::GenerateNumberTask;
use crate::types::TaskId;

/// Parity of an integer.
///
/// ```
/// use parityflow::tasks::Parity;
///
/// assert_eq!(Parity::of(42), Parity::Even);
/// assert_eq!(Parity::of(7), Parity::Odd);
/// assert_eq!(Parity::of(100).as_str(), "even");
/// assert_eq!(Parity::of(1).as_str(), "odd");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    #[must_use]
    pub fn of(n: i64) -> Self {
        if n % 2 == 0 { Parity::Even } else { Parity::Odd }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Parity::Even => "even",
            Parity::Odd => "odd",
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reads the number its upstream producer published within the current run
/// and reports whether it is even or odd.
///
/// The upstream task id is configuration: the consumer names whose value it
/// depends on, mirroring how it would declare the dependency edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckEvenOddTask {
    upstream: TaskId,
}

impl CheckEvenOddTask {
    #[must_use]
    pub fn new(upstream: impl Into<TaskId>) -> Self {
        Self {
            upstream: upstream.into(),
        }
    }

    pub fn upstream(&self) -> &TaskId {
        &self.upstream
    }
}

#[async_trait]
impl Task for CheckEvenOddTask {
    async fn execute(&self, ctx: TaskContext) -> Result<(), TaskError> {
        let value = ctx
            .xcom_pull(&self.upstream, GenerateNumberTask::XCOM_KEY)
            .await?;
        let Some(value) = value else {
            return Err(TaskError::MissingInput {
                what: GenerateNumberTask::XCOM_KEY,
            });
        };
        let number = value.as_i64().ok_or_else(|| {
            TaskError::ValidationFailed(format!(
                "expected an integer under '{}', got {value}",
                GenerateNumberTask::XCOM_KEY
            ))
        })?;

        let parity = Parity::of(number);
        ctx.emit("check", format!("The number {number} is {parity}."))?;
        tracing::debug!(number, %parity, task = %ctx.task_id, "classified number");
        Ok(())
    }
}
