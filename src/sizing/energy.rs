//! Energy and utility-cost aggregation over a load list.

use crate::loads::LoadList;

use super::types::ConsumptionSummary;

/// Days per month used for monthly totals.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// Days per year used for yearly totals.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Sums daily energy and peak power, and prices them at `tariff_per_kwh`.
///
/// An empty list yields an all-zero summary.
pub fn summarize(loads: &LoadList, tariff_per_kwh: f64) -> ConsumptionSummary {
    let daily_wh: f64 = loads.iter().map(|l| l.daily_wh()).sum();
    let peak_w: f64 = loads.iter().map(|l| l.peak_w()).sum();

    let daily_kwh = daily_wh / 1000.0;
    let monthly_kwh = daily_kwh * DAYS_PER_MONTH;
    let yearly_kwh = daily_kwh * DAYS_PER_YEAR;

    ConsumptionSummary {
        daily_wh,
        daily_kwh,
        monthly_kwh,
        yearly_kwh,
        peak_w,
        daily_cost: daily_kwh * tariff_per_kwh,
        monthly_cost: monthly_kwh * tariff_per_kwh,
        yearly_cost: yearly_kwh * tariff_per_kwh,
    }
}
