//! Run id construction helpers.
//!
//! Run ids follow the host-platform convention of a trigger prefix plus a
//! discriminator: `scheduled__{logical_date}` for schedule-driven runs and
//! `manual__{uuid}` for ad-hoc ones.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::types::RunId;

#[derive(Clone, Copy, Debug, Default)]
pub struct IdGenerator;

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run id for a schedule-driven run covering `logical_date`.
    #[must_use]
    pub fn scheduled_run_id(&self, logical_date: DateTime<Utc>) -> RunId {
        RunId::new(format!(
            "scheduled__{}",
            logical_date.to_rfc3339_opts(SecondsFormat::Secs, true)
        ))
    }

    /// Run id for an ad-hoc run outside any schedule.
    #[must_use]
    pub fn manual_run_id(&self) -> RunId {
        RunId::new(format!("manual__{}", Uuid::new_v4()))
    }
}
