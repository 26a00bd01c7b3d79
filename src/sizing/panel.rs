//! Photovoltaic array sizing.

use super::ceil_units;
use super::types::{PanelSizing, PanelSpec};
use crate::error::SizingError;

/// Sizes the array needed to cover `daily_wh` after losses.
///
/// `required_wp = daily_wh * (1 + loss) / sun_hours`; the module count is the
/// ceiling of `required_wp / unit_wp`.
///
/// # Errors
///
/// Returns [`SizingError::TooManyUnits`] if the module count overflows.
pub fn size_panels(
    daily_wh: f64,
    loss_fraction: f64,
    sun_hours: f64,
    spec: &PanelSpec,
) -> Result<PanelSizing, SizingError> {
    let required_wp = daily_wh * (1.0 + loss_fraction) / sun_hours;
    let count = ceil_units(required_wp / spec.wp, "panel")?;

    Ok(PanelSizing {
        required_wp,
        unit_wp: spec.wp,
        count,
        array_wp: f64::from(count) * spec.wp,
        cost: spec.price.cost(count, required_wp),
    })
}
