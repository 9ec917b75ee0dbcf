//! The leaf tasks of the random-number workflow.

pub mod classify;
pub mod generate;

pub use classify::{CheckEvenOddTask, Parity};
pub use generate::GenerateNumberTask;
