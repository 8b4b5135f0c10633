//! Output module for reporting on the contents of a store

pub mod stats;

pub use stats::{load_statistics, print_statistics, StoreStatistics};
