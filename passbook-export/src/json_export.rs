//! Structured export: a pretty-printed JSON array of records.

use std::fs;
use std::path::Path;

use passbook_core::TransactionRecord;

use crate::error::{ExportError, Result};

pub fn write_records_json(path: &Path, records: &[TransactionRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|e| ExportError::io(path, e))?;
    Ok(())
}

/// Load a JSON export. Anything unreadable or invalid is a [`ExportError::MalformedExport`].
pub fn read_records_json(path: &Path) -> Result<Vec<TransactionRecord>> {
    let s = fs::read_to_string(path).map_err(|e| ExportError::malformed(path, e))?;
    serde_json::from_str(&s).map_err(|e| ExportError::malformed(path, e))
}

/// Concatenate JSON exports in the given order into `merged`. Returns the record count.
pub fn merge_json_exports(parts: &[impl AsRef<Path>], merged: &Path) -> Result<usize> {
    let mut all = Vec::new();
    for part in parts {
        all.extend(read_records_json(part.as_ref())?);
    }
    write_records_json(merged, &all)?;
    Ok(all.len())
}
