//! CSV import of load tables.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::info;

use crate::error::SizingError;
use crate::loads::{LoadEntry, LoadList};

/// Columns a load table must contain. `name` is optional.
pub const REQUIRED_COLUMNS: [&str; 3] = ["power_w", "quantity", "hours_per_day"];

/// Reads a load table from a CSV file at `path`.
///
/// # Errors
///
/// See [`read_loads`]; additionally returns an I/O error if the file cannot
/// be opened.
pub fn import_loads(path: &Path) -> Result<LoadList, SizingError> {
    let file = File::open(path)?;
    let loads = read_loads(io::BufReader::new(file))?;
    info!(path = %path.display(), loads = loads.len(), "imported load table");
    Ok(loads)
}

/// Reads a load table from any CSV source.
///
/// Rows whose power or hours are not strictly positive are dropped the same
/// way [`LoadList::push`] drops them.
///
/// # Errors
///
/// Returns [`SizingError::MissingColumns`] if the header lacks any of
/// [`REQUIRED_COLUMNS`]; the table cannot be used and the load list must be
/// reset. Returns [`SizingError::Csv`] if a row cannot be parsed.
pub fn read_loads(reader: impl Read) -> Result<LoadList, SizingError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(ToString::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(SizingError::MissingColumns { missing });
    }

    let mut loads = LoadList::new();
    for row in rdr.deserialize::<LoadEntry>() {
        loads.push(row?);
    }
    Ok(loads)
}
