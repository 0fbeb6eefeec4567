//! File parsers for the supported sheet formats.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;

use super::{IngestError, IngestResult, RawTable};

/// Read a table from disk, dispatching on the file extension.
pub fn read_table<P: AsRef<Path>>(path: P) -> IngestResult<RawTable> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(IngestError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => read_csv(path),
        "xlsx" | "xls" => read_excel(path),
        _ => Err(IngestError::UnsupportedFormat(ext)),
    }
}

fn read_csv(path: &Path) -> IngestResult<RawTable> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // tolerate ragged rows
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = HashMap::new();

        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row.insert(header.clone(), value.trim().to_string());
            }
        }

        if row.values().all(|value| value.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

fn read_excel(path: &Path) -> IngestResult<RawTable> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| IngestError::Excel(e.to_string()))?;

    // Only the first sheet is read, matching how the reports are exported.
    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| IngestError::EmptySheet(path.display().to_string()))?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Excel(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let header_row = sheet_rows
        .next()
        .ok_or_else(|| IngestError::EmptySheet(path.display().to_string()))?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for data_row in sheet_rows {
        let mut row = HashMap::new();

        for (col_idx, cell) in data_row.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row.insert(header.clone(), cell.to_string().trim().to_string());
            }
        }

        if row.values().all(|value| value.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}
