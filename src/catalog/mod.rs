//! Static component catalogs for catalog-priced sizing.
//!
//! Each catalog is a read-only table keyed by a descriptive label. Prices are
//! in Rupiah per unit.

/// Battery modules.
pub mod battery;
/// Solar charge controllers.
pub mod controller;
/// Inverters.
pub mod inverter;
/// Photovoltaic modules.
pub mod panel;
pub mod types;

pub use battery::BatteryModel;
pub use controller::ControllerModel;
pub use inverter::InverterModel;
pub use panel::PanelModel;
pub use types::{InverterKind, Phase};
