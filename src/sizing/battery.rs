//! Battery bank sizing for off-grid and hybrid systems.
//!
//! One rule covers every module voltage. Modules at or below the bus voltage
//! are stacked in series up to the bus voltage; a module above it (including
//! high-voltage packs) forms a string on its own. Strings are then paralleled
//! until their stored energy covers the requirement. For modules whose
//! voltage divides the bus voltage this reduces to `ceil(required_Ah /
//! unit_Ah)` strings, and for high-voltage packs to `ceil(required_Wh /
//! (unit_V * unit_Ah))` units. A module whose voltage does not divide the
//! bus voltage (12.8 V on a 12 V bus) is still counted by stored energy, which
//! can need fewer strings than the ampere-hour rule at the bus voltage.

use tracing::debug;

use super::ceil_units;
use super::types::{BatterySizing, BatterySpec};
use crate::error::SizingError;

/// Sizes the battery bank for `daily_wh` over `autonomy_days`.
///
/// # Errors
///
/// Returns [`SizingError::TooManyUnits`] if the bank's module count overflows.
pub fn size_battery(
    daily_wh: f64,
    autonomy_days: u32,
    dod_fraction: f64,
    system_voltage: u32,
    spec: &BatterySpec,
) -> Result<BatterySizing, SizingError> {
    let effective_dod = spec.max_dod.map_or(dod_fraction, |max| dod_fraction.min(max));
    let required_wh = daily_wh * f64::from(autonomy_days) / effective_dod;
    let bus_v = f64::from(system_voltage);
    let required_ah = required_wh / bus_v;

    let series = if spec.voltage_v <= bus_v {
        ((bus_v / spec.voltage_v + 1e-9).floor() as u32).max(1)
    } else {
        1
    };
    let string_wh = f64::from(series) * spec.voltage_v * spec.capacity_ah;
    let parallel = ceil_units(required_wh / string_wh, "battery")?.max(1);
    let units = series
        .checked_mul(parallel)
        .ok_or(SizingError::TooManyUnits {
            component: "battery",
            required: f64::from(series) * f64::from(parallel),
        })?;

    debug!(
        required_wh,
        effective_dod, series, parallel, "battery bank sized"
    );

    Ok(BatterySizing {
        required_wh,
        required_ah,
        effective_dod,
        series,
        parallel,
        units,
        cost: spec.price.cost(units, required_wh),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::types::PriceBasis;

    fn spec(voltage_v: f64, capacity_ah: f64, max_dod: Option<f64>) -> BatterySpec {
        BatterySpec {
            label: "test".to_string(),
            voltage_v,
            capacity_ah,
            max_dod,
            price: PriceBasis::PerUnit(1_000_000.0),
        }
    }

    #[test]
    fn twelve_volt_units_on_24v_bus() {
        // 2000 Wh / 0.5 = 4000 Wh = 166.7 Ah @ 24 V -> 2 strings of 2 x 100 Ah
        let s = size_battery(2000.0, 1, 0.5, 24, &spec(12.0, 100.0, None)).unwrap();
        assert!((s.required_wh - 4000.0).abs() < 1e-9);
        assert!((s.required_ah - 166.666_666).abs() < 1e-3);
        assert_eq!(s.series, 2);
        assert_eq!(s.parallel, 2);
        assert_eq!(s.units, 4);
        assert_eq!(s.cost, 4_000_000.0);
    }

    #[test]
    fn matches_ampere_hour_rule_when_voltage_divides() {
        for (daily_wh, days, bus) in [(1500.0, 1, 12), (3200.0, 2, 24), (9000.0, 3, 48)] {
            let s = size_battery(daily_wh, days, 0.6, bus, &spec(12.0, 100.0, None)).unwrap();
            let expected_parallel = (s.required_ah / 100.0).ceil() as u32;
            assert_eq!(s.parallel, expected_parallel);
            assert_eq!(s.series, bus / 12);
        }
    }

    #[test]
    fn high_voltage_pack_sized_by_energy() {
        // 10 kWh * 2 / 0.9 = 22.2 kWh; one pack holds 10.24 kWh -> 3 packs
        let s = size_battery(10_000.0, 2, 0.9, 48, &spec(204.8, 50.0, None)).unwrap();
        assert_eq!(s.series, 1);
        assert_eq!(s.units, 3);
    }

    #[test]
    fn rated_dod_caps_configured_dod() {
        let s = size_battery(1000.0, 1, 0.8, 12, &spec(12.0, 100.0, Some(0.5))).unwrap();
        assert_eq!(s.effective_dod, 0.5);
        assert!((s.required_wh - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn at_least_one_unit() {
        let s = size_battery(1.0, 1, 0.9, 12, &spec(12.8, 100.0, None)).unwrap();
        assert!(s.units >= 1);
        assert_eq!(s.series, 1);
    }

    #[test]
    fn flat_pricing_charges_required_energy() {
        let mut bat = spec(12.0, 100.0, None);
        bat.price = PriceBasis::PerCapacity(3000.0);
        let s = size_battery(1000.0, 1, 0.5, 24, &bat).unwrap();
        assert!((s.cost - 6_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn non_dividing_voltage_sized_by_energy() {
        // 1225 Wh / 0.5 = 2450 Wh; 204.2 Ah @ 12 V would take 3 x 100 Ah,
        // but one 12.8 V module stores 1280 Wh, so 2 modules cover it
        let s = size_battery(1225.0, 1, 0.5, 12, &spec(12.8, 100.0, None)).unwrap();
        assert_eq!(s.series, 1);
        assert_eq!(s.parallel, 2);
        assert_eq!((s.required_ah / 100.0).ceil() as u32, 3);

        // on a 24 V bus two 12.8 V modules exceed the bus, so strings stay single
        let s = size_battery(1225.0, 1, 0.5, 24, &spec(12.8, 100.0, None)).unwrap();
        assert_eq!(s.series, 1);
        assert_eq!(s.units, 2);
    }

    #[test]
    fn oversized_bank_is_an_error() {
        // 4 x 12 V in series on 48 V; 2e9 strings fit a u32, 8e9 modules do not
        let err = size_battery(4.8e12, 1, 0.5, 48, &spec(12.0, 100.0, None)).unwrap_err();
        assert!(matches!(err, SizingError::TooManyUnits { component: "battery", .. }));

        let err = size_battery(1.0e15, 1, 0.5, 48, &spec(12.0, 100.0, None)).unwrap_err();
        assert!(matches!(err, SizingError::TooManyUnits { component: "battery", .. }));
    }
}
