//! Total investment and simple payback.

use super::types::{InvestmentSummary, SystemKind};

/// Adds up component costs and the installation cost.
pub fn total_investment(
    panel: f64,
    battery: f64,
    inverter: f64,
    controller: f64,
    installation: f64,
) -> InvestmentSummary {
    InvestmentSummary {
        panel,
        battery,
        inverter,
        controller,
        installation,
        total: panel + battery + inverter + controller + installation,
    }
}

/// Years for avoided utility cost to repay `total`.
///
/// Returns `None` for off-grid systems, which have no bill to offset, and
/// when the yearly utility cost is zero.
pub fn payback_years(kind: SystemKind, total: f64, yearly_cost: f64) -> Option<f64> {
    if !kind.offsets_utility_bill() || yearly_cost <= 0.0 {
        return None;
    }
    Some(total / yearly_cost)
}
