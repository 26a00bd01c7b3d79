//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{BatteryModel, ControllerModel, InverterModel, PanelModel};
use crate::loads::{LoadEntry, LoadList};
use crate::sizing::cashflow::DEFAULT_TARIFF_ESCALATION;
use crate::sizing::types::{
    BatterySpec, ComponentSpecs, ControllerSpec, InstallationSpec, InverterSpec, Mounting,
    PanelSpec, PriceBasis, SystemKind, SystemParameters,
};

/// Top-level scenario configuration parsed from TOML.
///
/// All sections have defaults matching the `home_on_grid` preset minus its
/// loads. Load from TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::from_preset`] for a built-in scenario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// System type, tariff and mounting.
    #[serde(default)]
    pub system: SystemConfig,
    /// Site and electrical parameters.
    #[serde(default)]
    pub technical: TechnicalConfig,
    /// Pricing mode and catalog selections.
    #[serde(default)]
    pub components: ComponentsConfig,
    /// Unit ratings and prices used in flat pricing mode.
    #[serde(default)]
    pub flat: FlatPricingConfig,
    /// Installation cost.
    #[serde(default)]
    pub installation: InstallationConfig,
    /// Cash-flow projection parameters.
    #[serde(default)]
    pub finance: FinanceConfig,
    /// Electrical loads, in entry order.
    #[serde(default)]
    pub loads: Vec<LoadEntry>,
}

/// System type, tariff and mounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfig {
    /// `"on_grid"`, `"off_grid"` or `"hybrid"`.
    pub kind: SystemKind,
    /// Utility tariff (Rp/kWh).
    pub tariff_per_kwh: f64,
    /// Mounting surface, scales installation cost in catalog mode.
    pub mounting: Mounting,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            kind: SystemKind::OnGrid,
            tariff_per_kwh: 1444.0,
            mounting: Mounting::TileRoof,
        }
    }
}

/// Site and electrical parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TechnicalConfig {
    /// Effective peak sun hours per day.
    pub sun_hours: f64,
    /// System loss fraction (0.0-1.0).
    pub loss_fraction: f64,
    /// DC bus voltage: 12, 24 or 48.
    pub system_voltage: u32,
    /// Battery depth of discharge fraction (0.0-1.0).
    pub dod_fraction: f64,
    /// Days of battery autonomy.
    pub autonomy_days: u32,
}

impl Default for TechnicalConfig {
    fn default() -> Self {
        Self {
            sun_hours: 4.5,
            loss_fraction: 0.30,
            system_voltage: 24,
            dod_fraction: 0.50,
            autonomy_days: 1,
        }
    }
}

/// How component prices are determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Price per Wp / per Wh plus fixed inverter and controller prices.
    #[default]
    Flat,
    /// Units and prices from the built-in catalogs.
    Catalog,
}

/// Pricing mode and catalog selections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentsConfig {
    pub pricing: PricingMode,
    /// Panel catalog label (catalog mode).
    pub panel: String,
    /// Battery catalog label (catalog mode).
    pub battery: String,
    /// Inverter catalog label (catalog mode).
    pub inverter: String,
    /// Charge controller catalog label (catalog mode).
    pub controller: String,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            pricing: PricingMode::Flat,
            panel: "Mono 550 Wp".to_string(),
            battery: "VRLA 12V 100Ah".to_string(),
            inverter: "Hybrid 3600W".to_string(),
            controller: "MPPT 60A".to_string(),
        }
    }
}

/// Unit ratings and prices used in flat pricing mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlatPricingConfig {
    /// Module capacity (Wp).
    pub panel_wp: f64,
    /// Panel price per required Wp (Rp/Wp).
    pub panel_price_per_wp: f64,
    /// Battery unit capacity (Ah).
    pub battery_ah: f64,
    /// Battery unit voltage (V).
    pub battery_voltage_v: f64,
    /// Battery price per required Wh (Rp/Wh).
    pub battery_price_per_wh: f64,
    /// Inverter price (Rp).
    pub inverter_price: f64,
    /// Charge controller price (Rp).
    pub controller_price: f64,
}

impl Default for FlatPricingConfig {
    fn default() -> Self {
        Self {
            panel_wp: 550.0,
            panel_price_per_wp: 4000.0,
            battery_ah: 100.0,
            battery_voltage_v: 12.0,
            battery_price_per_wh: 3000.0,
            inverter_price: 3_000_000.0,
            controller_price: 1_500_000.0,
        }
    }
}

/// Installation cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallationConfig {
    /// Base installation cost before scaling (Rp).
    pub base_cost: f64,
}

impl Default for InstallationConfig {
    fn default() -> Self {
        Self {
            base_cost: 3_000_000.0,
        }
    }
}

/// Cash-flow projection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinanceConfig {
    /// Yearly utility tariff escalation fraction.
    pub tariff_escalation: f64,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            tariff_escalation: DEFAULT_TARIFF_ESCALATION,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"technical.sun_hours"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

fn load(name: &str, power_w: f64, quantity: u32, hours_per_day: f64) -> LoadEntry {
    LoadEntry::new(name, power_w, quantity, hours_per_day)
}

impl ScenarioConfig {
    /// Grid-tied house, flat pricing.
    pub fn home_on_grid() -> Self {
        Self {
            loads: vec![
                load("LED lamp", 10.0, 8, 10.0),
                load("Refrigerator", 120.0, 1, 24.0),
                load("Television", 100.0, 1, 6.0),
                load("Air conditioner", 750.0, 1, 8.0),
                load("Water pump", 250.0, 1, 2.0),
            ],
            ..Self::default()
        }
    }

    /// Stand-alone cabin with a small battery bank, flat pricing.
    pub fn cabin_off_grid() -> Self {
        Self {
            system: SystemConfig {
                kind: SystemKind::OffGrid,
                ..SystemConfig::default()
            },
            technical: TechnicalConfig {
                system_voltage: 12,
                dod_fraction: 0.5,
                autonomy_days: 2,
                ..TechnicalConfig::default()
            },
            loads: vec![
                load("LED lamp", 7.0, 6, 8.0),
                load("Phone charger", 10.0, 2, 3.0),
                load("Laptop", 65.0, 1, 5.0),
                load("Fan", 40.0, 1, 8.0),
            ],
            ..Self::default()
        }
    }

    /// Hybrid house on a metal roof, catalog pricing.
    pub fn home_hybrid() -> Self {
        Self {
            system: SystemConfig {
                kind: SystemKind::Hybrid,
                mounting: Mounting::MetalRoof,
                ..SystemConfig::default()
            },
            technical: TechnicalConfig {
                system_voltage: 48,
                dod_fraction: 0.8,
                ..TechnicalConfig::default()
            },
            components: ComponentsConfig {
                pricing: PricingMode::Catalog,
                panel: "Mono 550 Wp".to_string(),
                battery: "LiFePO4 48V 100Ah".to_string(),
                inverter: "Hybrid 5000W".to_string(),
                controller: "MPPT 60A".to_string(),
            },
            installation: InstallationConfig {
                base_cost: 5_000_000.0,
            },
            loads: vec![
                load("LED lamp", 10.0, 12, 10.0),
                load("Refrigerator", 150.0, 1, 24.0),
                load("Television", 100.0, 2, 6.0),
                load("Air conditioner", 900.0, 2, 8.0),
                load("Rice cooker", 350.0, 1, 1.5),
                load("Washing machine", 400.0, 1, 1.0),
            ],
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["home_on_grid", "cabin_off_grid", "home_hybrid"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "home_on_grid" => Ok(Self::home_on_grid()),
            "cabin_off_grid" => Ok(Self::cabin_off_grid()),
            "home_hybrid" => Ok(Self::home_hybrid()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// The configured loads as a load list, dropping invalid entries.
    pub fn load_list(&self) -> LoadList {
        self.loads.iter().cloned().collect()
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Catalog labels are checked here. Numeric ranges are checked by
    /// [`SystemParameters::validate`] on the resolved parameters, with
    /// flat-mode component fields reported under their `[flat]` keys.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        if self.components.pricing == PricingMode::Catalog {
            let errors = self.validate_catalog();
            if !errors.is_empty() {
                return errors;
            }
        }
        match self.resolve() {
            Ok(params) => params
                .validate()
                .into_iter()
                .map(|e| self.toml_field(e))
                .collect(),
            Err(e) => vec![e],
        }
    }

    /// Renames a component field to the `[flat]` key it was read from.
    fn toml_field(&self, mut error: ConfigError) -> ConfigError {
        if self.components.pricing != PricingMode::Flat {
            return error;
        }
        let key = match error.field.as_str() {
            "panel.wp" => "flat.panel_wp",
            "panel.price" => "flat.panel_price_per_wp",
            "battery.voltage_v" => "flat.battery_voltage_v",
            "battery.capacity_ah" => "flat.battery_ah",
            "battery.price" => "flat.battery_price_per_wh",
            "inverter.price" => "flat.inverter_price",
            "controller.price" => "flat.controller_price",
            _ => return error,
        };
        error.field = key.to_string();
        error
    }

    fn validate_catalog(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let c = &self.components;
        let mut unknown = |field: &str, label: &str, available: Vec<&str>| {
            errors.push(ConfigError {
                field: field.into(),
                message: format!(
                    "unknown catalog entry \"{label}\", available: {}",
                    available.join(", ")
                ),
            });
        };

        if PanelModel::find(&c.panel).is_none() {
            unknown("components.panel", &c.panel, PanelModel::labels().collect());
        }
        if self.system.kind.has_battery() && BatteryModel::find(&c.battery).is_none() {
            unknown("components.battery", &c.battery, BatteryModel::labels().collect());
        }
        let inverter = InverterModel::find(&c.inverter);
        if inverter.is_none() {
            unknown("components.inverter", &c.inverter, InverterModel::labels().collect());
        }
        let needs_controller = inverter.is_some_and(|i| !i.kind.has_builtin_controller());
        if needs_controller && ControllerModel::find(&c.controller).is_none() {
            unknown(
                "components.controller",
                &c.controller,
                ControllerModel::labels().collect(),
            );
        }
        errors
    }

    /// Resolves the scenario into sizing parameters.
    ///
    /// # Errors
    ///
    /// Returns every validation error if the scenario is invalid.
    pub fn to_parameters(&self) -> Result<SystemParameters, Vec<ConfigError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        self.resolve().map_err(|e| vec![e])
    }

    /// Builds the parameters without range checks.
    fn resolve(&self) -> Result<SystemParameters, ConfigError> {
        let (components, installation) = match self.components.pricing {
            PricingMode::Flat => (self.flat_components(), InstallationSpec {
                base_cost: self.installation.base_cost,
                mounting: None,
                phase: None,
            }),
            PricingMode::Catalog => {
                let components = self.catalog_components()?;
                let installation = InstallationSpec {
                    base_cost: self.installation.base_cost,
                    mounting: Some(self.system.mounting),
                    phase: Some(components.inverter.phase),
                };
                (components, installation)
            }
        };

        let t = &self.technical;
        Ok(SystemParameters {
            kind: self.system.kind,
            sun_hours: t.sun_hours,
            loss_fraction: t.loss_fraction,
            system_voltage: t.system_voltage,
            dod_fraction: t.dod_fraction,
            autonomy_days: t.autonomy_days,
            tariff_per_kwh: self.system.tariff_per_kwh,
            tariff_escalation: self.finance.tariff_escalation,
            installation,
            components,
        })
    }

    fn flat_components(&self) -> ComponentSpecs {
        let f = &self.flat;
        ComponentSpecs {
            panel: PanelSpec {
                label: format!("{:.0} Wp module", f.panel_wp),
                wp: f.panel_wp,
                price: PriceBasis::PerCapacity(f.panel_price_per_wp),
            },
            battery: BatterySpec {
                label: format!("{:.0}V {:.0}Ah battery", f.battery_voltage_v, f.battery_ah),
                voltage_v: f.battery_voltage_v,
                capacity_ah: f.battery_ah,
                max_dod: None,
                price: PriceBasis::PerCapacity(f.battery_price_per_wh),
            },
            inverter: InverterSpec {
                label: "inverter".to_string(),
                rating_w: None,
                kind: None,
                phase: Default::default(),
                price: f.inverter_price,
            },
            controller: ControllerSpec::Fixed {
                price: f.controller_price,
            },
        }
    }

    fn catalog_components(&self) -> Result<ComponentSpecs, ConfigError> {
        let c = &self.components;
        let missing = |field: &str, label: &str| ConfigError {
            field: field.into(),
            message: format!("unknown catalog entry \"{label}\""),
        };

        let panel = PanelModel::find(&c.panel).ok_or_else(|| missing("components.panel", &c.panel))?;
        let inverter = InverterModel::find(&c.inverter)
            .ok_or_else(|| missing("components.inverter", &c.inverter))?;

        // Selections sizing never reads (battery on-grid, controller behind a
        // built-in one) fall back to the first catalog entry.
        let battery = BatteryModel::find(&c.battery).unwrap_or(&BatteryModel::ALL[0]);
        let controller = ControllerModel::find(&c.controller).unwrap_or(&ControllerModel::ALL[0]);

        Ok(ComponentSpecs {
            panel: PanelSpec {
                label: panel.label.to_string(),
                wp: panel.wp,
                price: PriceBasis::PerUnit(panel.price),
            },
            battery: BatterySpec {
                label: battery.label.to_string(),
                voltage_v: battery.voltage_v,
                capacity_ah: battery.capacity_ah,
                max_dod: Some(battery.max_dod),
                price: PriceBasis::PerUnit(battery.price),
            },
            inverter: InverterSpec {
                label: inverter.label.to_string(),
                rating_w: Some(inverter.rating_w),
                kind: Some(inverter.kind),
                phase: inverter.phase,
                price: inverter.price,
            },
            controller: ControllerSpec::Rated {
                label: controller.label.to_string(),
                current_a: controller.current_a,
                price: controller.price,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Phase;

    #[test]
    fn default_scenario_valid() {
        let cfg = ScenarioConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
        assert!(cfg.loads.is_empty());
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
            assert!(cfg.as_ref().is_ok_and(|c| !c.load_list().is_empty()));
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[system]
kind = "off_grid"
tariff_per_kwh = 1699.53
mounting = "ground"

[technical]
sun_hours = 4.0
loss_fraction = 0.25
system_voltage = 48
dod_fraction = 0.8
autonomy_days = 2

[components]
pricing = "catalog"
panel = "Mono 450 Wp"
battery = "LiFePO4 48V 100Ah"
inverter = "Off-Grid 3000W"
controller = "MPPT 100A"

[installation]
base_cost = 4000000

[finance]
tariff_escalation = 0.03

[[loads]]
name = "Lamp"
power_w = 10
quantity = 5
hours_per_day = 12

[[loads]]
name = "Pump"
power_w = 125
hours_per_day = 1.5
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.system.kind), Some(SystemKind::OffGrid));
        assert_eq!(cfg.as_ref().map(|c| c.technical.system_voltage), Some(48));
        assert_eq!(cfg.as_ref().map(|c| c.loads.len()), Some(2));
        // quantity defaults to 1
        assert_eq!(cfg.as_ref().map(|c| c.loads[1].quantity), Some(1));
        assert!(cfg.as_ref().is_some_and(|c| c.validate().is_empty()));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[technical]
sun_hours = 4.5
bogus_field = true
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[system]
tariff_per_kwh = 2000
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.system.tariff_per_kwh), Some(2000.0));
        assert_eq!(cfg.as_ref().map(|c| c.technical.sun_hours), Some(4.5));
        assert_eq!(cfg.as_ref().map(|c| c.flat.panel_wp), Some(550.0));
    }

    #[test]
    fn validation_catches_bad_voltage() {
        let mut cfg = ScenarioConfig::default();
        cfg.technical.system_voltage = 36;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "technical.system_voltage"));
    }

    #[test]
    fn validation_catches_zero_sun_hours() {
        let mut cfg = ScenarioConfig::default();
        cfg.technical.sun_hours = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "technical.sun_hours"));
    }

    #[test]
    fn dod_only_checked_with_battery() {
        let mut cfg = ScenarioConfig::default();
        cfg.technical.dod_fraction = 0.0;
        assert!(cfg.validate().is_empty());
        cfg.system.kind = SystemKind::Hybrid;
        assert!(cfg.validate().iter().any(|e| e.field == "technical.dod_fraction"));
    }

    #[test]
    fn validation_catches_unknown_catalog_label() {
        let mut cfg = ScenarioConfig::home_hybrid();
        cfg.components.panel = "Mono 9000 Wp".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "components.panel"));
    }

    #[test]
    fn builtin_controller_ignores_controller_label() {
        let mut cfg = ScenarioConfig::home_hybrid();
        cfg.components.controller = "nonexistent".to_string();
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn flat_parameters_use_capacity_pricing() {
        let params = ScenarioConfig::home_on_grid().to_parameters();
        assert!(params.is_ok());
        let params = params.ok();
        let panel_price = params.as_ref().map(|p| p.components.panel.price);
        assert_eq!(panel_price, Some(PriceBasis::PerCapacity(4000.0)));
        assert_eq!(params.as_ref().and_then(|p| p.installation.mounting), None);
    }

    #[test]
    fn catalog_parameters_take_phase_from_inverter() {
        let mut cfg = ScenarioConfig::home_hybrid();
        cfg.components.inverter = "On-Grid 10kW 3-Phase".to_string();
        let params = cfg.to_parameters().ok();
        assert_eq!(
            params.as_ref().and_then(|p| p.installation.phase),
            Some(Phase::Three)
        );
        assert_eq!(
            params.as_ref().and_then(|p| p.installation.mounting),
            Some(Mounting::MetalRoof)
        );
    }

    #[test]
    fn to_parameters_reports_all_errors() {
        let mut cfg = ScenarioConfig::default();
        cfg.technical.sun_hours = -1.0;
        cfg.flat.panel_wp = 0.0;
        let errors = cfg.to_parameters().err().unwrap_or_default();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn infinite_toml_values_are_rejected() {
        let cfg = ScenarioConfig::from_toml_str("[technical]\nsun_hours = inf\n").unwrap();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "technical.sun_hours"));
        assert!(cfg.to_parameters().is_err());

        let toml = "[system]\ntariff_per_kwh = inf\n\n[flat]\npanel_wp = inf\n";
        let errors = ScenarioConfig::from_toml_str(toml).unwrap().validate();
        assert!(errors.iter().any(|e| e.field == "system.tariff_per_kwh"));
        assert!(errors.iter().any(|e| e.field == "flat.panel_wp"));
    }

    #[test]
    fn flat_errors_use_flat_keys() {
        let mut cfg = ScenarioConfig::cabin_off_grid();
        cfg.flat.battery_ah = 0.0;
        cfg.flat.controller_price = -1.0;
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, ["flat.battery_ah", "flat.controller_price"]);
    }
}
