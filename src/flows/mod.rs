//! Concrete workflow definitions shipped with the crate.

pub mod random_number;
