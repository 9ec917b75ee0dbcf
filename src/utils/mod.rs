//! Small helpers shared across the crate.

pub mod id_generator;
