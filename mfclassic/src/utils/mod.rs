//! Small helpers shared across the crate.

pub mod timeout;

pub use timeout::*;
