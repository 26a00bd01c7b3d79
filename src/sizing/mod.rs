//! Sizing pipeline: consumption, components, investment and payback.

pub mod battery;
pub mod cashflow;
pub mod energy;
pub mod inverter;
pub mod investment;
pub mod panel;
/// Human-readable rendering of an evaluation.
pub mod report;
pub mod types;

use tracing::{info, warn};

use crate::error::SizingError;
use crate::loads::LoadList;

pub use types::{Evaluation, SystemKind, SystemParameters, SystemSizing};

/// Absorbs floating-point noise before rounding a unit count up.
const CEIL_EPSILON: f64 = 1e-9;

/// Rounds up, treating values within [`CEIL_EPSILON`] of an integer as that
/// integer.
pub(crate) fn ceil_noise(x: f64) -> f64 {
    (x - CEIL_EPSILON).ceil().max(0.0)
}

/// Rounds a fractional unit count of `component` up to a whole count.
///
/// # Errors
///
/// Returns [`SizingError::TooManyUnits`] if the count is not finite or does
/// not fit in a `u32`.
pub(crate) fn ceil_units(x: f64, component: &'static str) -> Result<u32, SizingError> {
    let units = ceil_noise(x);
    if x.is_finite() && units <= f64::from(u32::MAX) {
        Ok(units as u32)
    } else {
        Err(SizingError::TooManyUnits {
            component,
            required: x,
        })
    }
}

/// Evaluates the whole sizing for `loads` under `params`.
///
/// The consumption summary is always produced. Component sizing, investment
/// and payback are only computed for a non-empty load list.
///
/// # Errors
///
/// Returns [`SizingError::Config`] if `params` fails validation, and
/// [`SizingError::TooManyUnits`] if a component count overflows.
pub fn evaluate(loads: &LoadList, params: &SystemParameters) -> Result<Evaluation, SizingError> {
    let errors = params.validate();
    if !errors.is_empty() {
        return Err(SizingError::Config(errors));
    }
    if params.tariff_per_kwh == 0.0 {
        warn!("utility tariff is zero, payback will not be computed");
    }

    let consumption = energy::summarize(loads, params.tariff_per_kwh);
    if loads.is_empty() {
        return Ok(Evaluation {
            kind: params.kind,
            consumption,
            sizing: None,
        });
    }

    let c = &params.components;
    let panel = panel::size_panels(
        consumption.daily_wh,
        params.loss_fraction,
        params.sun_hours,
        &c.panel,
    )?;
    let battery = if params.kind.has_battery() {
        Some(battery::size_battery(
            consumption.daily_wh,
            params.autonomy_days,
            params.dod_fraction,
            params.system_voltage,
            &c.battery,
        )?)
    } else {
        None
    };
    let inverter = inverter::size_inverter(consumption.peak_w, &c.inverter)?;
    let controller = inverter::size_controller(
        panel.array_wp,
        params.system_voltage,
        &c.inverter,
        &c.controller,
    )?;

    let investment = investment::total_investment(
        panel.cost,
        battery.as_ref().map_or(0.0, |b| b.cost),
        inverter.cost,
        controller.cost,
        params.installation.cost(),
    );
    let payback_years =
        investment::payback_years(params.kind, investment.total, consumption.yearly_cost);
    let cash_flow = payback_years.map(|_| {
        cashflow::project(
            investment.total,
            consumption.yearly_cost,
            params.tariff_escalation,
        )
    });

    info!(
        kind = %params.kind,
        loads = loads.len(),
        daily_kwh = consumption.daily_kwh,
        panels = panel.count,
        batteries = battery.as_ref().map_or(0, |b| b.units),
        total = investment.total,
        "evaluated sizing"
    );

    Ok(Evaluation {
        kind: params.kind,
        consumption,
        sizing: Some(SystemSizing {
            panel,
            battery,
            inverter,
            controller,
            investment,
            payback_years,
            cash_flow,
        }),
    })
}
