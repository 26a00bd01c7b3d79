use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by configuration, evaluation and load-table I/O.
#[derive(Debug, Error)]
pub enum SizingError {
    #[error("invalid configuration:\n{}", format_config_errors(.0))]
    Config(Vec<ConfigError>),
    /// The load table lacks required columns; the accumulated loads must be
    /// cleared and entered again.
    #[error("load table is missing required column(s): {}; reset the load list", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },
    /// A component count does not fit the unit counter.
    #[error("{component} would need {required:.0} units; check the load and rating inputs")]
    TooManyUnits {
        component: &'static str,
        required: f64,
    },
    #[error("malformed load table: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<ConfigError> for SizingError {
    fn from(e: ConfigError) -> Self {
        Self::Config(vec![e])
    }
}

fn format_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
