use serde::Serialize;

use super::types::{InverterKind, Phase};

/// An inverter offered in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InverterModel {
    /// Catalog label.
    pub label: &'static str,
    /// Continuous AC output rating (W).
    pub rating_w: f64,
    pub kind: InverterKind,
    pub phase: Phase,
    /// Price per unit (Rp).
    pub price: f64,
}

impl InverterModel {
    /// Every inverter in the catalog.
    pub const ALL: &'static [InverterModel] = &[
        InverterModel {
            label: "Off-Grid 1000W",
            rating_w: 1000.0,
            kind: InverterKind::OffGrid,
            phase: Phase::Single,
            price: 1_800_000.0,
        },
        InverterModel {
            label: "Off-Grid 3000W",
            rating_w: 3000.0,
            kind: InverterKind::OffGrid,
            phase: Phase::Single,
            price: 4_200_000.0,
        },
        InverterModel {
            label: "Hybrid 3600W",
            rating_w: 3600.0,
            kind: InverterKind::Hybrid,
            phase: Phase::Single,
            price: 9_500_000.0,
        },
        InverterModel {
            label: "Hybrid 5000W",
            rating_w: 5000.0,
            kind: InverterKind::Hybrid,
            phase: Phase::Single,
            price: 13_000_000.0,
        },
        InverterModel {
            label: "On-Grid 5000W",
            rating_w: 5000.0,
            kind: InverterKind::OnGrid,
            phase: Phase::Single,
            price: 8_000_000.0,
        },
        InverterModel {
            label: "On-Grid 10kW 3-Phase",
            rating_w: 10_000.0,
            kind: InverterKind::OnGrid,
            phase: Phase::Three,
            price: 16_500_000.0,
        },
    ];

    /// Looks up an inverter by its exact label.
    pub fn find(label: &str) -> Option<&'static Self> {
        Self::ALL.iter().find(|m| m.label == label)
    }

    /// Catalog labels in listing order.
    pub fn labels() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|m| m.label)
    }
}
