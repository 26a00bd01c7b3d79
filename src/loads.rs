//! Electrical load entries and the append-only load list.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest accepted rating of a single unit (W).
pub const MAX_UNIT_POWER_W: f64 = 1.0e6;
/// Largest accepted unit count of one entry.
pub const MAX_QUANTITY: u32 = 10_000;

/// One appliance line: `quantity` units drawing `power_w` for `hours_per_day`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadEntry {
    /// Appliance label, free text.
    #[serde(default)]
    pub name: String,
    /// Rated power of a single unit (W).
    pub power_w: f64,
    /// Number of identical units (>= 1).
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Daily operating hours (0-24).
    pub hours_per_day: f64,
}

fn default_quantity() -> u32 {
    1
}

impl LoadEntry {
    /// Creates a load entry.
    pub fn new(name: impl Into<String>, power_w: f64, quantity: u32, hours_per_day: f64) -> Self {
        Self {
            name: name.into(),
            power_w,
            quantity,
            hours_per_day,
        }
    }

    /// Simultaneous power of all units (W).
    pub fn peak_w(&self) -> f64 {
        self.power_w * f64::from(self.quantity)
    }

    /// Daily energy contribution (Wh).
    pub fn daily_wh(&self) -> f64 {
        self.peak_w() * self.hours_per_day
    }

    /// Whether the entry would be kept by [`LoadList::push`].
    ///
    /// Comparisons fail for NaN, so non-finite values are never valid.
    pub fn is_valid(&self) -> bool {
        self.power_w > 0.0
            && self.power_w <= MAX_UNIT_POWER_W
            && self.hours_per_day > 0.0
            && self.hours_per_day <= 24.0
            && (1..=MAX_QUANTITY).contains(&self.quantity)
    }
}

impl fmt::Display for LoadEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.0} W x {}, {:.1} h/day)",
            self.name, self.power_w, self.quantity, self.hours_per_day
        )
    }
}

/// Ordered list of load entries.
///
/// The only mutations are [`LoadList::push`] and [`LoadList::clear`]; entries
/// cannot be edited or removed individually.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LoadList {
    entries: Vec<LoadEntry>,
}

impl LoadList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, returning `false` if it was dropped.
    ///
    /// Entries with non-positive power or hours, more than 24 hours per day,
    /// zero quantity, or power or quantity above [`MAX_UNIT_POWER_W`] and
    /// [`MAX_QUANTITY`] are silently ignored.
    pub fn push(&mut self, entry: LoadEntry) -> bool {
        if !entry.is_valid() {
            debug!(entry = %entry, "dropping invalid load entry");
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LoadEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[LoadEntry] {
        &self.entries
    }
}

impl FromIterator<LoadEntry> for LoadList {
    /// Builds a list by pushing each entry, dropping invalid ones.
    fn from_iter<I: IntoIterator<Item = LoadEntry>>(iter: I) -> Self {
        let mut list = Self::new();
        for entry in iter {
            list.push(entry);
        }
        list
    }
}

impl<'a> IntoIterator for &'a LoadList {
    type Item = &'a LoadEntry;
    type IntoIter = std::slice::Iter<'a, LoadEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
