//! # Parityflow: a declarative two-task workflow definition
//!
//! Parityflow defines one illustrative workflow as data plus two small
//! tasks: `generate_number` draws a random integer in 1..=100 and hands it
//! downstream through a per-run key/value exchange; `check_even_odd` reads
//! it back and reports whether it is even or odd. The DAG is scheduled
//! daily over calendar year 2024 with retroactive catch-up disabled.
//!
//! The crate does not implement an orchestration platform. Everything a
//! platform owns (scheduling, dependency resolution, durable value
//! passing) is modeled as an injected capability:
//!
//! - [`xcom::XcomStore`] is the per-run key/value exchange contract;
//! - a compiled [`dag::Dag`] carries a topological order fixed at compile
//!   time, which is the whole ordering contract an executor must honor;
//! - [`schedule::Schedule`] is pure calendar arithmetic a host evaluates
//!   against its own clock.
//!
//! The bundled [`runtimes::LocalRunner`] and [`xcom::InMemoryXcom`] are
//! in-process reference implementations of those capabilities so the
//! definition is runnable and testable without a platform.
//!
//! ## Quick Start
//!
//! ```
//! use parityflow::flows::random_number::random_number_checker;
//!
//! let dag = random_number_checker().expect("valid definition");
//! assert_eq!(dag.id(), "random_number_checker");
//!
//! // Ordering is part of the compiled definition.
//! let order: Vec<_> = dag.order().iter().map(|t| t.as_str()).collect();
//! assert_eq!(order, ["generate_number", "check_even_odd"]);
//! ```
//!
//! Running a single day's run locally:
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use parityflow::flows::random_number::random_number_checker;
//! use parityflow::runtimes::LocalRunner;
//!
//! # async fn example() -> miette::Result<()> {
//! let runner = LocalRunner::new(random_number_checker()?);
//! let report = runner.run_once(Utc::now()).await?;
//! println!("run {} finished", report.run_id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Guide
//!
//! - [`types`] - Task and run identity types
//! - [`task`] - The [`Task`](task::Task) trait and execution context
//! - [`xcom`] - Per-run key/value exchange capability and reference store
//! - [`schedule`] - Declarative cadence, validity window, catch-up calculus
//! - [`dag`] - DAG builder, validation, and compiled definitions
//! - [`tasks`] - The generator and classifier leaf tasks
//! - [`flows`] - The concrete `random_number_checker` definition
//! - [`runtimes`] - Runtime configuration and the local reference runner
//! - [`event_bus`] - Structured observability events and sinks
//! - [`telemetry`] - Event formatting and tracing setup

pub mod dag;
pub mod event_bus;
pub mod flows;
pub mod runtimes;
pub mod schedule;
pub mod task;
pub mod tasks;
pub mod telemetry;
pub mod types;
pub mod utils;
pub mod xcom;
