//! Tabular export.
//!
//! Header: Date,Transaction Detail,Category,Inflow,Outflow
//! The unused direction column of each row is left empty.

use std::path::Path;

use passbook_core::TransactionRecord;

use crate::error::{ExportError, Result};

pub const CSV_HEADER: [&str; 5] = ["Date", "Transaction Detail", "Category", "Inflow", "Outflow"];

/// Write records as CSV. The header is written even when there are no records.
pub fn write_records_csv(path: &Path, records: &[TransactionRecord]) -> Result<()> {
    let csv_err = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    wtr.write_record(CSV_HEADER).map_err(csv_err)?;
    for rec in records {
        wtr.serialize(rec).map_err(csv_err)?;
    }
    wtr.flush().map_err(|e| ExportError::io(path, e))?;
    Ok(())
}

/// Parse a CSV export back into records.
pub fn read_records_csv(path: &Path) -> Result<Vec<TransactionRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| ExportError::malformed(path, e))?;

    let headers = rdr
        .headers()
        .map_err(|e| ExportError::malformed(path, e))?
        .clone();
    if headers.iter().ne(CSV_HEADER) {
        return Err(ExportError::malformed(
            path,
            format!("unexpected header: {}", headers.iter().collect::<Vec<_>>().join(",")),
        ));
    }

    let mut out = Vec::new();
    for result in rdr.deserialize::<TransactionRecord>() {
        out.push(result.map_err(|e| ExportError::malformed(path, e))?);
    }
    Ok(out)
}

/// Concatenate CSV exports in the given order into `merged`. Returns the record count.
pub fn merge_csv_exports(parts: &[impl AsRef<Path>], merged: &Path) -> Result<usize> {
    let mut all = Vec::new();
    for part in parts {
        all.extend(read_records_csv(part.as_ref())?);
    }
    write_records_csv(merged, &all)?;
    Ok(all.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use passbook_core::Flow;
    use std::fs;

    fn records() -> Vec<TransactionRecord> {
        let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
        vec![
            TransactionRecord::new(d(5, 1), "Starbucks", "Food", Flow::Outflow(-4.75)),
            TransactionRecord::new(d(5, 3), "Deposit Payroll", "Medical", Flow::Inflow(1250.0)),
            TransactionRecord::new(d(5, 9), "Lowe's, Inc", "Maintenance/Parts", Flow::Outflow(-1234.56)),
            TransactionRecord::new(d(5, 20), "Withdrawal", "Savings", Flow::Outflow(0.0)),
        ]
    }

    #[test]
    fn test_csv_roundtrip_reproduces_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("may.csv");
        write_records_csv(&path, &records()).unwrap();
        assert_eq!(read_records_csv(&path).unwrap(), records());
    }

    #[test]
    fn test_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("may.csv");
        write_records_csv(&path, &records()[..2]).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = raw.lines().collect();
        assert_eq!(lines[0], "Date,Transaction Detail,Category,Inflow,Outflow");
        assert_eq!(lines[1], "05-01-2024,Starbucks,Food,,-4.75");
        assert!(lines[2].starts_with("05-03-2024,Deposit Payroll,Medical,1250"));
        assert!(lines[2].ends_with(','));
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_records_csv(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), CSV_HEADER.join(","));
        assert!(read_records_csv(&path).unwrap().is_empty());
    }

    #[test]
    fn test_row_with_both_directions_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(
            &path,
            "Date,Transaction Detail,Category,Inflow,Outflow\n05-01-2024,Wawa,Fuel,1.00,2.00\n",
        )
        .unwrap();
        assert!(matches!(
            read_records_csv(&path).unwrap_err(),
            ExportError::MalformedExport { .. }
        ));
    }

    #[test]
    fn test_legacy_header_spelling_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        fs::write(
            &path,
            "Date,Transaction Detail,Catagory,Inflow,Outflow\n05-01-2024,Wawa,Fuel,,-2.00\n",
        )
        .unwrap();
        let err = read_records_csv(&path).unwrap_err();
        assert!(err.to_string().contains("unexpected header"));
    }

    #[test]
    fn test_merge_concatenates() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        write_records_csv(&a, &records()[..1]).unwrap();
        write_records_csv(&b, &records()[1..]).unwrap();
        let merged = dir.path().join("all.csv");
        assert_eq!(merge_csv_exports(&[&a, &b], &merged).unwrap(), 4);
        assert_eq!(read_records_csv(&merged).unwrap(), records());
    }
}
