use serde::Serialize;

/// A battery module offered in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryModel {
    /// Catalog label.
    pub label: &'static str,
    /// Nominal voltage (V).
    pub voltage_v: f64,
    /// Rated capacity (Ah).
    pub capacity_ah: f64,
    /// Manufacturer's maximum recommended depth of discharge (fraction).
    pub max_dod: f64,
    /// Price per module (Rp).
    pub price: f64,
}

impl BatteryModel {
    /// Every module in the catalog.
    pub const ALL: &'static [BatteryModel] = &[
        BatteryModel {
            label: "VRLA 12V 100Ah",
            voltage_v: 12.0,
            capacity_ah: 100.0,
            max_dod: 0.5,
            price: 2_100_000.0,
        },
        BatteryModel {
            label: "VRLA 12V 200Ah",
            voltage_v: 12.0,
            capacity_ah: 200.0,
            max_dod: 0.5,
            price: 4_000_000.0,
        },
        BatteryModel {
            label: "LiFePO4 12.8V 100Ah",
            voltage_v: 12.8,
            capacity_ah: 100.0,
            max_dod: 0.9,
            price: 5_500_000.0,
        },
        BatteryModel {
            label: "LiFePO4 24V 100Ah",
            voltage_v: 24.0,
            capacity_ah: 100.0,
            max_dod: 0.9,
            price: 10_500_000.0,
        },
        BatteryModel {
            label: "LiFePO4 48V 100Ah",
            voltage_v: 48.0,
            capacity_ah: 100.0,
            max_dod: 0.9,
            price: 19_000_000.0,
        },
        BatteryModel {
            label: "HV LiFePO4 204.8V 50Ah",
            voltage_v: 204.8,
            capacity_ah: 50.0,
            max_dod: 0.9,
            price: 65_000_000.0,
        },
    ];

    /// Looks up a module by its exact label.
    pub fn find(label: &str) -> Option<&'static Self> {
        Self::ALL.iter().find(|m| m.label == label)
    }

    /// Catalog labels in listing order.
    pub fn labels() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|m| m.label)
    }
}
