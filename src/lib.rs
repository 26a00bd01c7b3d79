//! Solar PV (PLTS) system sizing: energy use, component counts, investment and payback.

#[cfg(feature = "api")]
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod io;
pub mod loads;
/// Evaluation pipeline and its sizing steps.
pub mod sizing;

pub use error::SizingError;
pub use loads::{LoadEntry, LoadList};
pub use sizing::evaluate;
