use serde::Serialize;

/// A photovoltaic module offered in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelModel {
    /// Catalog label.
    pub label: &'static str,
    /// Nameplate capacity (Wp).
    pub wp: f64,
    /// Price per module (Rp).
    pub price: f64,
}

impl PanelModel {
    /// Every module in the catalog.
    pub const ALL: &'static [PanelModel] = &[
        PanelModel {
            label: "Poly 100 Wp",
            wp: 100.0,
            price: 650_000.0,
        },
        PanelModel {
            label: "Mono 200 Wp",
            wp: 200.0,
            price: 1_150_000.0,
        },
        PanelModel {
            label: "Mono 450 Wp",
            wp: 450.0,
            price: 2_000_000.0,
        },
        PanelModel {
            label: "Mono 550 Wp",
            wp: 550.0,
            price: 2_300_000.0,
        },
        PanelModel {
            label: "Bifacial 600 Wp",
            wp: 600.0,
            price: 2_750_000.0,
        },
    ];

    /// Looks up a module by its exact label.
    pub fn find(label: &str) -> Option<&'static Self> {
        Self::ALL.iter().find(|m| m.label == label)
    }

    /// Catalog labels in listing order.
    pub fn labels() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|m| m.label)
    }
}
