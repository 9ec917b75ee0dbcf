//! Run one day of the random number checker workflow locally.
//!
//! ```sh
//! cargo run --example daily_parity
//! ```

use chrono::Utc;
use parityflow::flows::random_number::random_number_checker;
use parityflow::runtimes::LocalRunner;

#[tokio::main]
async fn main() -> miette::Result<()> {
    parityflow::telemetry::init_tracing();

    let dag = random_number_checker()?;
    let now = Utc::now();
    // Prefer the schedule's most recent window; fall back to an ad-hoc run
    // when the clock is outside the validity window.
    let logical_date = dag
        .schedule()
        .and_then(|schedule| schedule.latest_fire_at(now))
        .unwrap_or(now);

    let runner = LocalRunner::new(dag);
    let report = runner.run_once(logical_date).await?;
    println!(
        "run {} for {} completed {} task(s)",
        report.run_id,
        report.logical_date,
        report.completed.len()
    );
    Ok(())
}
