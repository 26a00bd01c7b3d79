//! Core sizing types: system parameters, component specs, and evaluation results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{InverterKind, Phase};
use crate::config::ConfigError;

/// DC bus voltages the sizing accepts.
pub const SYSTEM_VOLTAGES: [u32; 3] = [12, 24, 48];

/// Grid topology of the installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemKind {
    /// Grid-tied, no storage.
    #[default]
    OnGrid,
    /// Stand-alone with battery storage, no utility connection.
    OffGrid,
    /// Grid-tied with battery storage.
    Hybrid,
}

impl SystemKind {
    /// Whether battery storage is sized for this system.
    pub fn has_battery(self) -> bool {
        matches!(self, Self::OffGrid | Self::Hybrid)
    }

    /// Whether the system replaces a utility bill, making payback meaningful.
    pub fn offsets_utility_bill(self) -> bool {
        matches!(self, Self::OnGrid | Self::Hybrid)
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OnGrid => "On-Grid",
            Self::OffGrid => "Off-Grid",
            Self::Hybrid => "Hybrid",
        })
    }
}

/// How a component's cost is derived from the sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    /// Price per physical unit (Rp).
    PerUnit(f64),
    /// Price per unit of required capacity: Rp/Wp for panels, Rp/Wh for batteries.
    PerCapacity(f64),
}

impl PriceBasis {
    /// Cost for `units` physical units covering `required_capacity`.
    pub fn cost(self, units: u32, required_capacity: f64) -> f64 {
        match self {
            Self::PerUnit(price) => f64::from(units) * price,
            Self::PerCapacity(price) => required_capacity * price,
        }
    }

    fn amount(self) -> f64 {
        match self {
            Self::PerUnit(p) | Self::PerCapacity(p) => p,
        }
    }
}

/// Panel unit used for the array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSpec {
    pub label: String,
    /// Nameplate capacity per module (Wp).
    pub wp: f64,
    pub price: PriceBasis,
}

/// Battery unit used for the bank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatterySpec {
    pub label: String,
    /// Nominal voltage per module (V).
    pub voltage_v: f64,
    /// Capacity per module (Ah).
    pub capacity_ah: f64,
    /// Rated maximum depth of discharge, caps the configured DoD when set.
    pub max_dod: Option<f64>,
    pub price: PriceBasis,
}

/// Inverter unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InverterSpec {
    pub label: String,
    /// Output rating per unit (W). `None` means one unit sized to the load.
    pub rating_w: Option<f64>,
    /// `None` when the grid relationship is unknown (flat pricing).
    pub kind: Option<InverterKind>,
    pub phase: Phase,
    /// Price per unit (Rp).
    pub price: f64,
}

/// Solar charge controller unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControllerSpec {
    /// A single controller at a fixed price regardless of array current.
    Fixed { price: f64 },
    /// A rated catalog unit, repeated when the array current exceeds it.
    Rated {
        label: String,
        current_a: f64,
        price: f64,
    },
}

/// Concrete units and prices for every component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSpecs {
    pub panel: PanelSpec,
    pub battery: BatterySpec,
    pub inverter: InverterSpec,
    pub controller: ControllerSpec,
}

/// Surface the array is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mounting {
    #[default]
    TileRoof,
    MetalRoof,
    ConcreteRoof,
    Ground,
}

impl Mounting {
    /// Multiplier applied to the base installation cost.
    pub fn installation_factor(self) -> f64 {
        match self {
            Self::TileRoof => 1.0,
            Self::MetalRoof => 0.9,
            Self::ConcreteRoof => 1.1,
            Self::Ground => 1.2,
        }
    }
}

/// Installation labour and material cost model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstallationSpec {
    /// Unscaled installation cost (Rp).
    pub base_cost: f64,
    /// Mounting surface; `None` leaves the base cost unscaled.
    pub mounting: Option<Mounting>,
    /// Phase count; `None` leaves the base cost unscaled.
    pub phase: Option<Phase>,
}

impl InstallationSpec {
    /// Installation cost after mounting and phase scaling (Rp).
    pub fn cost(&self) -> f64 {
        self.base_cost
            * self.mounting.map_or(1.0, Mounting::installation_factor)
            * self.phase.map_or(1.0, Phase::installation_factor)
    }
}

/// Every scalar input of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemParameters {
    pub kind: SystemKind,
    /// Effective peak sun hours per day.
    pub sun_hours: f64,
    /// System loss as a fraction (0.30 = 30 %).
    pub loss_fraction: f64,
    /// DC bus voltage (12, 24 or 48 V).
    pub system_voltage: u32,
    /// Usable battery fraction before recharge.
    pub dod_fraction: f64,
    /// Days the battery must carry the load without sun.
    pub autonomy_days: u32,
    /// Utility tariff (Rp/kWh).
    pub tariff_per_kwh: f64,
    /// Yearly tariff escalation used by the cash-flow projection.
    pub tariff_escalation: f64,
    pub installation: InstallationSpec,
    pub components: ComponentSpecs,
}

/// Longest battery autonomy accepted, in days.
pub const MAX_AUTONOMY_DAYS: u32 = 30;

fn positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

fn non_negative(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}

impl SystemParameters {
    /// Checks every divisor and range the sizing formulas rely on.
    ///
    /// Every value must be finite. Component fields are reported as
    /// `panel.*`, `battery.*`, `inverter.*` and `controller.*`.
    ///
    /// Returns an empty vector if the parameters are usable.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: &str, message: String| {
            if !ok {
                errors.push(ConfigError {
                    field: field.to_string(),
                    message,
                });
            }
        };
        let must_be_positive = || "must be finite and > 0".to_string();
        let must_be_non_negative = || "must be finite and >= 0".to_string();

        check(
            positive(self.sun_hours) && self.sun_hours <= 24.0,
            "technical.sun_hours",
            format!("must be in (0, 24], got {}", self.sun_hours),
        );
        check(
            (0.0..1.0).contains(&self.loss_fraction),
            "technical.loss_fraction",
            format!("must be in [0.0, 1.0), got {}", self.loss_fraction),
        );
        check(
            SYSTEM_VOLTAGES.contains(&self.system_voltage),
            "technical.system_voltage",
            format!("must be 12, 24 or 48, got {}", self.system_voltage),
        );
        check(
            non_negative(self.tariff_per_kwh),
            "system.tariff_per_kwh",
            must_be_non_negative(),
        );
        check(
            non_negative(self.tariff_escalation),
            "finance.tariff_escalation",
            must_be_non_negative(),
        );
        check(
            non_negative(self.installation.base_cost),
            "installation.base_cost",
            must_be_non_negative(),
        );

        let c = &self.components;
        if self.kind.has_battery() {
            check(
                self.dod_fraction > 0.0 && self.dod_fraction <= 1.0,
                "technical.dod_fraction",
                format!("must be in (0.0, 1.0], got {}", self.dod_fraction),
            );
            check(
                (1..=MAX_AUTONOMY_DAYS).contains(&self.autonomy_days),
                "technical.autonomy_days",
                format!("must be in 1..={MAX_AUTONOMY_DAYS}, got {}", self.autonomy_days),
            );
            check(positive(c.battery.voltage_v), "battery.voltage_v", must_be_positive());
            check(positive(c.battery.capacity_ah), "battery.capacity_ah", must_be_positive());
            check(non_negative(c.battery.price.amount()), "battery.price", must_be_non_negative());
        }

        check(positive(c.panel.wp), "panel.wp", must_be_positive());
        check(non_negative(c.panel.price.amount()), "panel.price", must_be_non_negative());
        check(
            c.inverter.rating_w.is_none_or(positive),
            "inverter.rating_w",
            must_be_positive(),
        );
        check(non_negative(c.inverter.price), "inverter.price", must_be_non_negative());
        match &c.controller {
            ControllerSpec::Fixed { price } => {
                check(non_negative(*price), "controller.price", must_be_non_negative());
            }
            ControllerSpec::Rated {
                current_a, price, ..
            } => {
                check(positive(*current_a), "controller.current_a", must_be_positive());
                check(non_negative(*price), "controller.price", must_be_non_negative());
            }
        }

        errors
    }
}

/// Energy use and utility cost of the load list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsumptionSummary {
    pub daily_wh: f64,
    pub daily_kwh: f64,
    pub monthly_kwh: f64,
    pub yearly_kwh: f64,
    /// Sum of power x quantity over all loads (W).
    pub peak_w: f64,
    pub daily_cost: f64,
    pub monthly_cost: f64,
    pub yearly_cost: f64,
}

/// Panel array recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSizing {
    pub required_wp: f64,
    pub unit_wp: f64,
    pub count: u32,
    /// Installed capacity, `count * unit_wp` (Wp).
    pub array_wp: f64,
    pub cost: f64,
}

/// Battery bank recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatterySizing {
    pub required_wh: f64,
    /// Required capacity at the system voltage (Ah).
    pub required_ah: f64,
    /// DoD actually used, after capping by the unit's rating.
    pub effective_dod: f64,
    /// Units per string.
    pub series: u32,
    /// Parallel strings.
    pub parallel: u32,
    pub units: u32,
    pub cost: f64,
}

/// Inverter recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InverterSizing {
    /// Minimum total rating, `ceil(peak * 1.3)` (W).
    pub required_w: f64,
    pub units: u32,
    pub cost: f64,
}

/// Charge controller recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerSizing {
    /// Minimum charging current (A).
    pub required_a: f64,
    /// The selected inverter already contains the controller.
    pub builtin: bool,
    pub units: u32,
    pub cost: f64,
}

/// Cost breakdown of the whole installation (Rp).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentSummary {
    pub panel: f64,
    pub battery: f64,
    pub inverter: f64,
    pub controller: f64,
    pub installation: f64,
    pub total: f64,
}

/// One year of the cash-flow projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CashFlowPoint {
    pub year: u32,
    /// Utility cost avoided during this year (0 for year 0).
    pub saving: f64,
    /// Cumulative position, starting at minus the investment.
    pub cumulative: f64,
}

/// Cumulative cash position over the projection horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlow {
    pub points: Vec<CashFlowPoint>,
    /// First year whose cumulative position is non-negative.
    pub break_even_year: Option<u32>,
}

/// Everything derived for a non-empty load list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSizing {
    pub panel: PanelSizing,
    /// `None` for on-grid systems.
    pub battery: Option<BatterySizing>,
    pub inverter: InverterSizing,
    pub controller: ControllerSizing,
    pub investment: InvestmentSummary,
    /// Years to recover the investment; `None` when not applicable.
    pub payback_years: Option<f64>,
    pub cash_flow: Option<CashFlow>,
}

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub kind: SystemKind,
    pub consumption: ConsumptionSummary,
    /// `None` when the load list is empty.
    pub sizing: Option<SystemSizing>,
}
