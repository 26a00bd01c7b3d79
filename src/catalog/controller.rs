use serde::Serialize;

/// A solar charge controller offered in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControllerModel {
    /// Catalog label.
    pub label: &'static str,
    /// Maximum charging current (A).
    pub current_a: f64,
    /// Price per unit (Rp).
    pub price: f64,
}

impl ControllerModel {
    /// Every controller in the catalog.
    pub const ALL: &'static [ControllerModel] = &[
        ControllerModel {
            label: "PWM 20A",
            current_a: 20.0,
            price: 350_000.0,
        },
        ControllerModel {
            label: "MPPT 40A",
            current_a: 40.0,
            price: 1_500_000.0,
        },
        ControllerModel {
            label: "MPPT 60A",
            current_a: 60.0,
            price: 2_400_000.0,
        },
        ControllerModel {
            label: "MPPT 100A",
            current_a: 100.0,
            price: 4_500_000.0,
        },
    ];

    /// Looks up a controller by its exact label.
    pub fn find(label: &str) -> Option<&'static Self> {
        Self::ALL.iter().find(|m| m.label == label)
    }

    /// Catalog labels in listing order.
    pub fn labels() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|m| m.label)
    }
}
