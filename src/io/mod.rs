//! CSV import and export of load tables and projections.

pub mod export;
pub mod import;
