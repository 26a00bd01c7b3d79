//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use plts_sizer::config::ScenarioConfig;
use plts_sizer::loads::{LoadEntry, LoadList};
use plts_sizer::sizing::{SystemKind, SystemParameters};

/// Single-line load list: 2 x 100 W for 5 h (1 kWh/day).
pub fn reference_loads() -> LoadList {
    std::iter::once(LoadEntry::new("TV", 100.0, 2, 5.0)).collect()
}

/// Mixed household load list (10.78 kWh/day, 1300 W peak).
pub fn household_loads() -> LoadList {
    vec![
        LoadEntry::new("LED lamp", 10.0, 8, 10.0),
        LoadEntry::new("Refrigerator", 120.0, 1, 24.0),
        LoadEntry::new("Television", 100.0, 1, 6.0),
        LoadEntry::new("Air conditioner", 750.0, 1, 8.0),
        LoadEntry::new("Water pump", 250.0, 1, 2.0),
    ]
    .into_iter()
    .collect()
}

/// Default flat-pricing parameters (tariff 1444, 4.5 PSH, 30% loss, 24 V).
pub fn flat_params(kind: SystemKind) -> SystemParameters {
    let mut scenario = ScenarioConfig::default();
    scenario.system.kind = kind;
    scenario
        .to_parameters()
        .expect("default scenario should be valid")
}

/// Resolved parameters of a built-in preset.
pub fn preset_params(name: &str) -> SystemParameters {
    ScenarioConfig::from_preset(name)
        .expect("preset should exist")
        .to_parameters()
        .expect("preset should be valid")
}
