//! Declarative recurring triggers for workflow DAGs.
//!
//! A [`Schedule`] describes *when* a host platform should start runs: a
//! cadence preset, a validity window, and a catch-up flag controlling
//! whether missed past windows are executed retroactively. The crate does
//! not run timers; all operations here are pure calendar arithmetic a host
//! evaluates against its own clock.
//!
//! Fire instants are the window boundaries `start + k * period` for
//! `k >= 0`. The `start` bound is inclusive, `end` is exclusive.
//!
//! # Examples
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use parityflow::schedule::{Cadence, Schedule};
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
//! let schedule = Schedule::new(Cadence::Daily, start).until(end).catchup(false);
//!
//! let mid_june = Utc.with_ymd_and_hms(2024, 6, 15, 7, 30, 0).unwrap();
//! assert!(schedule.is_active_at(mid_june));
//!
//! // With catch-up disabled and no prior run, only the latest elapsed
//! // window is due.
//! let due = schedule.due_runs(None, mid_june);
//! assert_eq!(due, vec![Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap()]);
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Recurrence presets, mirroring the `@hourly`/`@daily`/`@weekly` shorthand
/// of cron-style schedulers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cadence {
    Hourly,
    Daily,
    Weekly,
}

impl Cadence {
    /// Length of one schedule window.
    #[must_use]
    pub fn period(&self) -> Duration {
        match self {
            Cadence::Hourly => Duration::hours(1),
            Cadence::Daily => Duration::days(1),
            Cadence::Weekly => Duration::weeks(1),
        }
    }
}

/// A recurring trigger with a validity window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    cadence: Cadence,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    catchup: bool,
}

impl Schedule {
    /// Create a schedule starting at `start` with no end bound and
    /// catch-up enabled.
    #[must_use]
    pub fn new(cadence: Cadence, start: DateTime<Utc>) -> Self {
        Self {
            cadence,
            start,
            end: None,
            catchup: true,
        }
    }

    /// Bound the schedule's validity window. `end` is exclusive.
    #[must_use]
    pub fn until(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Control retroactive execution of missed past windows.
    #[must_use]
    pub fn catchup(mut self, catchup: bool) -> Self {
        self.catchup = catchup;
        self
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn catchup_enabled(&self) -> bool {
        self.catchup
    }

    /// Whether `at` falls inside the validity window.
    #[must_use]
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && self.end.is_none_or(|end| at < end)
    }

    fn period_secs(&self) -> i64 {
        self.cadence.period().num_seconds()
    }

    fn boundary(&self, k: i64) -> DateTime<Utc> {
        self.start + Duration::seconds(k * self.period_secs())
    }

    /// Index of the last boundary not later than `at` and inside the
    /// validity window, if any.
    fn latest_index_at(&self, at: DateTime<Utc>) -> Option<i64> {
        if at < self.start {
            return None;
        }
        let mut k = (at - self.start).num_seconds() / self.period_secs();
        if let Some(end) = self.end {
            if end <= self.start {
                return None;
            }
            let k_max = ((end - self.start).num_seconds() - 1) / self.period_secs();
            k = k.min(k_max);
        }
        Some(k)
    }

    /// The most recent fire instant at or before `at`, if any.
    #[must_use]
    pub fn latest_fire_at(&self, at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.latest_index_at(at).map(|k| self.boundary(k))
    }

    /// The next fire instant strictly after `at`, if the window has one.
    #[must_use]
    pub fn next_fire_after(&self, at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let candidate = if at < self.start {
            self.start
        } else {
            let k = (at - self.start).num_seconds() / self.period_secs();
            self.boundary(k + 1)
        };
        match self.end {
            Some(end) if candidate >= end => None,
            _ => Some(candidate),
        }
    }

    /// Fire instants a host should run now, given the last run it recorded.
    ///
    /// - With catch-up enabled, every elapsed boundary after `last_run`
    ///   (or from `start` when no run is recorded) is due.
    /// - With catch-up disabled, only the most recent elapsed boundary is
    ///   due, and only while the window is still active. Earlier missed
    ///   windows are never executed retroactively, whether the gap is a
    ///   cold start or a stall after a recorded run.
    #[must_use]
    pub fn due_runs(
        &self,
        last_run: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Vec<DateTime<Utc>> {
        let Some(latest) = self.latest_index_at(now) else {
            return Vec::new();
        };
        let first = match last_run.and_then(|last| self.latest_index_at(last)) {
            Some(k) => k + 1,
            None => 0,
        };
        if first > latest {
            return Vec::new();
        }
        if self.catchup {
            (first..=latest).map(|k| self.boundary(k)).collect()
        } else if self.is_active_at(now) {
            vec![self.boundary(latest)]
        } else {
            Vec::new()
        }
    }
}
