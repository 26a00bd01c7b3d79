//! Inverter and charge controller sizing.

use super::types::{ControllerSizing, ControllerSpec, InverterSizing, InverterSpec};
use super::{ceil_noise, ceil_units};
use crate::error::SizingError;

/// Inverter headroom over the simultaneous load.
pub const INVERTER_MARGIN: f64 = 1.3;
/// Charge controller headroom over the array current.
pub const CONTROLLER_MARGIN: f64 = 1.2;

/// Sizes the inverter for `peak_w` with [`INVERTER_MARGIN`] headroom.
///
/// # Errors
///
/// Returns [`SizingError::TooManyUnits`] if the unit count overflows.
pub fn size_inverter(peak_w: f64, spec: &InverterSpec) -> Result<InverterSizing, SizingError> {
    let required_w = ceil_noise(peak_w * INVERTER_MARGIN);
    let units = match spec.rating_w {
        Some(rating) => ceil_units(required_w / rating, "inverter")?.max(1),
        None => 1,
    };

    Ok(InverterSizing {
        required_w,
        units,
        cost: f64::from(units) * spec.price,
    })
}

/// Sizes the charge controller for an array of `array_wp` on the DC bus.
///
/// No controller is bought when the inverter has one built in.
///
/// # Errors
///
/// Returns [`SizingError::TooManyUnits`] if the unit count overflows.
pub fn size_controller(
    array_wp: f64,
    system_voltage: u32,
    inverter: &InverterSpec,
    spec: &ControllerSpec,
) -> Result<ControllerSizing, SizingError> {
    let required_a = ceil_noise(array_wp / f64::from(system_voltage) * CONTROLLER_MARGIN);

    if inverter.kind.is_some_and(|k| k.has_builtin_controller()) {
        return Ok(ControllerSizing {
            required_a,
            builtin: true,
            units: 0,
            cost: 0.0,
        });
    }

    let (units, cost) = match spec {
        ControllerSpec::Fixed { price } => (1, *price),
        ControllerSpec::Rated {
            current_a, price, ..
        } => {
            let units = ceil_units(required_a / current_a, "charge controller")?.max(1);
            (units, f64::from(units) * price)
        }
    };

    Ok(ControllerSizing {
        required_a,
        builtin: false,
        units,
        cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InverterKind, Phase};

    fn inverter(rating_w: Option<f64>, kind: Option<InverterKind>) -> InverterSpec {
        InverterSpec {
            label: "test".to_string(),
            rating_w,
            kind,
            phase: Phase::Single,
            price: 3_000_000.0,
        }
    }

    #[test]
    fn inverter_margin_is_applied() {
        let s = size_inverter(200.0, &inverter(None, None)).unwrap();
        assert_eq!(s.required_w, 260.0);
        assert_eq!(s.units, 1);
        assert_eq!(s.cost, 3_000_000.0);
    }

    #[test]
    fn inverter_required_rounds_up() {
        let s = size_inverter(1234.0, &inverter(None, None)).unwrap();
        assert_eq!(s.required_w, 1605.0);
    }

    #[test]
    fn rated_inverter_multiplies_units() {
        let s = size_inverter(5000.0, &inverter(Some(3000.0), Some(InverterKind::OffGrid))).unwrap();
        assert_eq!(s.required_w, 6500.0);
        assert_eq!(s.units, 3);
        assert_eq!(s.cost, 9_000_000.0);
    }

    #[test]
    fn controller_current_rounds_up() {
        let s = size_controller(
            2200.0,
            24,
            &inverter(None, None),
            &ControllerSpec::Fixed { price: 1_500_000.0 },
        ).unwrap();
        // 2200 / 24 * 1.2 = 110
        assert_eq!(s.required_a, 110.0);
        assert!(!s.builtin);
        assert_eq!(s.units, 1);
        assert_eq!(s.cost, 1_500_000.0);
    }

    #[test]
    fn hybrid_inverter_has_builtin_controller() {
        let rated = ControllerSpec::Rated {
            label: "MPPT 60A".to_string(),
            current_a: 60.0,
            price: 2_400_000.0,
        };
        let s = size_controller(3000.0, 48, &inverter(Some(5000.0), Some(InverterKind::Hybrid)), &rated).unwrap();
        assert!(s.builtin);
        assert_eq!(s.cost, 0.0);
        assert_eq!(s.units, 0);
    }

    #[test]
    fn off_grid_inverter_needs_rated_controllers() {
        let rated = ControllerSpec::Rated {
            label: "MPPT 40A".to_string(),
            current_a: 40.0,
            price: 1_500_000.0,
        };
        // 2200 / 24 * 1.2 = 110 A -> 3 x 40 A
        let s = size_controller(2200.0, 24, &inverter(Some(3000.0), Some(InverterKind::OffGrid)), &rated).unwrap();
        assert_eq!(s.units, 3);
        assert_eq!(s.cost, 4_500_000.0);
    }
}
