//! The unified comparison report.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{ChangeRecord, ChangeType};

use super::{ExportError, ExportResult};

/// Fixed display columns, in output order. Always emitted; a record without
/// a value renders the cell empty.
const DISPLAY_COLUMNS: [&str; 9] = [
    "ChangeType",
    "POReferenceNumber",
    "Notes",
    "Name",
    "DrugName",
    "NDC",
    "Quantity",
    "Submitted Quantity",
    "Product Description",
];

/// Forecast metric columns, appended in this order when the merged data
/// carries them. Absent columns are silently omitted.
const FORECAST_DISPLAY_COLUMNS: [&str; 11] = [
    "Required Qty",
    "On Hand Qty",
    "Pending Qty",
    "Pending Treatment Qty",
    "Patient Qty",
    "Transfer In",
    "Transfer Out",
    "Net Qty",
    "PAR Min",
    "PAR Max",
    "Order Qty with PAR (in Inventory Units)",
];

/// Per-change-type record counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeCounts {
    pub quantity_changed: usize,
    pub added: usize,
    pub removed: usize,
}

impl ChangeCounts {
    /// Total records across the three change types.
    pub fn total(&self) -> usize {
        self.quantity_changed + self.added + self.removed
    }
}

/// The unified comparison report: classified, enriched records in
/// presentation order plus the resolved display columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnifiedReport {
    /// Report generation timestamp
    pub generated_at: String,
    /// Resolved display columns, in output order
    pub columns: Vec<String>,
    /// Records in presentation order: Quantity Changed, Added, Removed
    pub records: Vec<ChangeRecord>,
}

impl UnifiedReport {
    /// Assemble a report from enriched records, resolving display columns
    /// against the columns actually present in the merged data.
    pub fn new(records: Vec<ChangeRecord>) -> Self {
        let merged: HashSet<String> = records
            .iter()
            .flat_map(|record| record.merged_cells().into_iter().map(|(name, _)| name))
            .collect();

        let mut columns: Vec<String> = DISPLAY_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(
            FORECAST_DISPLAY_COLUMNS
                .iter()
                .filter(|column| merged.contains(**column))
                .map(|c| c.to_string()),
        );

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            columns,
            records,
        }
    }

    /// Number of report lines.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the report has no lines.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cell values for one record, in display column order.
    pub fn row_values(&self, record: &ChangeRecord) -> Vec<String> {
        let cells = record.merged_cells();
        self.columns
            .iter()
            .map(|column| {
                cells
                    .iter()
                    .find(|(name, _)| name == column)
                    .map(|(_, value)| value.clone())
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Record counts per change type.
    pub fn change_counts(&self) -> ChangeCounts {
        let mut counts = ChangeCounts::default();
        for record in &self.records {
            match record.change_type {
                ChangeType::QuantityChanged => counts.quantity_changed += 1,
                ChangeType::Added => counts.added += 1,
                ChangeType::Removed => counts.removed += 1,
            }
        }
        counts
    }

    /// Serialize the report to CSV text: exact column set, exact row order.
    pub fn to_csv(&self) -> ExportResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for record in &self.records {
            writer.write_record(self.row_values(record))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::Write(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ExportError::Write(e.to_string()))
    }

    /// Serialize the full report (columns, records, timestamp) to JSON.
    pub fn to_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render a plain-text table of the display columns.
    pub fn render_table(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .records
            .iter()
            .map(|record| self.row_values(record))
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &rows {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_row(&mut out, &self.columns, &widths);
        let separators: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_row(&mut out, &separators, &widths);
        for row in &rows {
            push_row(&mut out, row, &widths);
        }
        out
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{:<width$}", cell))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
