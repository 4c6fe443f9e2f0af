// File: src/sheet.rs
use crate::core::rows::Sheet;
use crate::error::{CollocError, Result};
use std::path::Path;

/// Reads a delimited sheet export (no header row) fully into memory.
/// Cells are kept verbatim. The file is closed before this returns.
pub fn open_sheet(path: &Path, delimiter: u8) -> Result<Sheet> {
    let sheet_err = |source| CollocError::Sheet { path: path.to_path_buf(), source };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(sheet_err)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(sheet_err)?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(Sheet::new(rows))
}
