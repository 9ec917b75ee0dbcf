//! Runtime infrastructure for driving runs of a compiled DAG.
//!
//! The runtime layer is intentionally thin: production execution belongs to
//! a host platform, and this module only provides the configuration types
//! and the sequential [`LocalRunner`] reference host used for local
//! execution and tests.

pub mod runner;
pub mod runtime_config;

pub use runner::{LocalRunner, RunReport, RunnerError};
pub use runtime_config::{EventBusConfig, RuntimeConfig, SinkConfig};
