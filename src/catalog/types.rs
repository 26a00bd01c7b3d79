//! Attribute enums shared by catalog entries and sizing parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid relationship of an inverter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InverterKind {
    /// Stand-alone inverter, needs a separate charge controller.
    OffGrid,
    /// Grid-interactive inverter with integrated MPPT charger.
    Hybrid,
    /// Grid-tie inverter with integrated MPPT tracker.
    OnGrid,
}

impl InverterKind {
    /// Whether the inverter already contains the charge controller.
    pub fn has_builtin_controller(self) -> bool {
        matches!(self, Self::Hybrid | Self::OnGrid)
    }
}

impl fmt::Display for InverterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OffGrid => "off-grid",
            Self::Hybrid => "hybrid",
            Self::OnGrid => "on-grid",
        })
    }
}

/// AC phase count of the installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Single,
    Three,
}

impl Phase {
    /// Multiplier applied to the base installation cost.
    pub fn installation_factor(self) -> f64 {
        match self {
            Self::Single => 1.0,
            Self::Three => 1.25,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "1-phase",
            Self::Three => "3-phase",
        })
    }
}
