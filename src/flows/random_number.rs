//! The random number checker workflow.
//!
//! Two chained tasks: `generate_number` draws an integer in 1..=100 and
//! publishes it; `check_even_odd` reads it back and reports its parity.
//! The DAG is scheduled daily across calendar year 2024 with retroactive
//! catch-up disabled.

use chrono::{DateTime, TimeZone, Utc};

use crate::dag::{Dag, DagBuilder, DagCompileError};
use crate::schedule::{Cadence, Schedule};
use crate::tasks::{CheckEvenOddTask, GenerateNumberTask};

pub const DAG_ID: &str = "random_number_checker";
pub const GENERATE_TASK_ID: &str = "generate_number";
pub const CHECK_TASK_ID: &str = "check_even_odd";

const DOC: &str = "\
# Random Number Checker DAG

This DAG generates a random number and checks if it's even or odd.
";

/// Build and validate the workflow definition.
///
/// ```
/// use parityflow::flows::random_number::random_number_checker;
///
/// let dag = random_number_checker().unwrap();
/// assert_eq!(dag.id(), "random_number_checker");
/// let order: Vec<_> = dag.order().iter().map(|t| t.as_str()).collect();
/// assert_eq!(order, ["generate_number", "check_even_odd"]);
/// ```
pub fn random_number_checker() -> Result<Dag, DagCompileError> {
    let schedule = Schedule::new(Cadence::Daily, utc_midnight(2024, 1, 1))
        .until(utc_midnight(2025, 1, 1))
        .catchup(false);

    DagBuilder::new(DAG_ID)
        .description("A simple DAG to generate and check random numbers")
        .doc(DOC)
        .schedule(schedule)
        .add_task(GENERATE_TASK_ID, GenerateNumberTask::new())
        .add_task(CHECK_TASK_ID, CheckEvenOddTask::new(GENERATE_TASK_ID))
        .add_edge(GENERATE_TASK_ID, CHECK_TASK_ID)
        .compile()
}

fn utc_midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date literal")
}
