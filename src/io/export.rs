//! CSV export for load tables and cash-flow projections.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::loads::LoadList;
use crate::sizing::types::CashFlow;

/// Column header for load table export.
const LOADS_HEADER: &str = "name,power_w,quantity,hours_per_day,energy_wh_per_day,energy_kwh_per_day";

/// Column header for cash-flow export.
const CASH_FLOW_HEADER: &str = "year,saving,cumulative";

/// Exports the load table to a CSV file at the given path.
///
/// The output can be read back with [`crate::io::import::import_loads`]; the
/// energy columns are ignored on import.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_loads_csv(loads: &LoadList, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_loads_csv(loads, io::BufWriter::new(file))
}

/// Writes the load table as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_loads_csv(loads: &LoadList, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(LOADS_HEADER.split(','))?;

    for l in loads {
        wtr.write_record(&[
            l.name.clone(),
            format!("{}", l.power_w),
            l.quantity.to_string(),
            format!("{}", l.hours_per_day),
            format!("{:.2}", l.daily_wh()),
            format!("{:.4}", l.daily_wh() / 1000.0),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a cash-flow projection to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_cash_flow_csv(cash_flow: &CashFlow, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_cash_flow_csv(cash_flow, io::BufWriter::new(file))
}

/// Writes a cash-flow projection as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_cash_flow_csv(cash_flow: &CashFlow, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(CASH_FLOW_HEADER.split(','))?;

    for p in &cash_flow.points {
        wtr.write_record(&[
            p.year.to_string(),
            format!("{:.2}", p.saving),
            format!("{:.2}", p.cumulative),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::import::read_loads;
    use crate::loads::LoadEntry;
    use crate::sizing::cashflow;

    fn sample_loads() -> LoadList {
        vec![
            LoadEntry::new("Lamp", 10.0, 4, 12.0),
            LoadEntry::new("Fridge, large", 150.0, 1, 24.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn loads_header_and_row_count() {
        let mut buf = Vec::new();
        write_loads_csv(&sample_loads(), &mut buf).ok();
        let output = String::from_utf8(buf).ok().unwrap_or_default();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.first().copied(), Some(LOADS_HEADER));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn exported_loads_import_back() {
        let loads = sample_loads();
        let mut buf = Vec::new();
        write_loads_csv(&loads, &mut buf).ok();
        let back = read_loads(buf.as_slice()).ok();
        assert_eq!(back.as_ref(), Some(&loads));
    }

    #[test]
    fn cash_flow_has_header_plus_21_rows() {
        let cf = cashflow::project(1_000_000.0, 200_000.0, 0.05);
        let mut buf = Vec::new();
        write_cash_flow_csv(&cf, &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(3));

        let mut rows = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            if let Some(rec) = rec {
                for i in 0..3 {
                    assert!(rec[i].parse::<f64>().is_ok(), "column {i} should be numeric");
                }
            }
            rows += 1;
        }
        assert_eq!(rows, 21);
    }
}
