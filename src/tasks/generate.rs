//! Random number producer task.

use async_trait::async_trait;
use rand::Rng;
use serde_json::json;

use crate::task::{Task, TaskContext, TaskError};

/// Draws one integer uniformly from an inclusive range and publishes it for
/// downstream tasks under [`GenerateNumberTask::XCOM_KEY`].
///
/// The default bounds are 1 through 100 inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateNumberTask {
    min: i64,
    max: i64,
}

impl Default for GenerateNumberTask {
    fn default() -> Self {
        Self { min: 1, max: 100 }
    }
}

impl GenerateNumberTask {
    /// Exchange key the drawn value is published under.
    pub const XCOM_KEY: &'static str = "random_number";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom inclusive bounds. An inverted range fails at execution
    /// time with a validation error.
    #[must_use]
    pub fn bounded(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

#[async_trait]
impl Task for GenerateNumberTask {
    async fn execute(&self, ctx: TaskContext) -> Result<(), TaskError> {
        if self.min > self.max {
            return Err(TaskError::ValidationFailed(format!(
                "empty range: {}..={}",
                self.min, self.max
            )));
        }

        let number = rand::rng().random_range(self.min..=self.max);
        ctx.xcom_push(Self::XCOM_KEY, json!(number)).await?;
        ctx.emit("generate", format!("Generated random number: {number}"))?;
        tracing::debug!(number, task = %ctx.task_id, "published random number");
        Ok(())
    }
}
