//! Order reconciliation pipeline.
//!
//! Pipeline: Normalization → Key Builder → Differ → Enricher

mod differ;
mod enricher;
mod normalizer;

pub use differ::*;
pub use enricher::*;
pub use normalizer::*;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::export::UnifiedReport;
use crate::ingest::{read_table, IngestError, RawTable};
use crate::models::{ForecastRow, OrderRow};

/// Which of the three input tables a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Draft,
    Submitted,
    Forecast,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Draft => "draft order",
            TableKind::Submitted => "submitted order",
            TableKind::Forecast => "forecast report",
        };
        f.write_str(name)
    }
}

/// Reconciliation errors.
#[derive(Error, Debug)]
pub enum ReconError {
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("{table} is missing required column '{column}'")]
    MissingColumn { table: TableKind, column: String },
}

pub type ReconResult<T> = Result<T, ReconError>;

/// Columns every order table must carry.
const ORDER_COLUMNS: [&str; 4] = ["Notes", "Name", "NDC", "Quantity"];
/// Columns the forecast report must carry.
const FORECAST_COLUMNS: [&str; 2] = ["StationName", "NDC"];

/// Order columns consumed into typed fields rather than the extra map.
const ORDER_CONSUMED: [&str; 5] = ["Notes", "Name", "NDC", "Quantity", "POReferenceNumber"];
/// Forecast columns consumed into typed fields rather than the metrics map.
const FORECAST_CONSUMED: [&str; 4] = ["StationName", "NDC", "DrugName", "Product Description"];

fn require_columns(raw: &RawTable, table: TableKind, columns: &[&str]) -> ReconResult<()> {
    for column in columns {
        if !raw.has_column(column) {
            return Err(ReconError::MissingColumn {
                table,
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn field(record: &HashMap<String, String>, column: &str) -> String {
    record.get(column).cloned().unwrap_or_default()
}

fn optional_field(record: &HashMap<String, String>, column: &str) -> Option<String> {
    record.get(column).filter(|value| !value.is_empty()).cloned()
}

/// Build typed order rows from a raw table, normalizing NDCs and coercing
/// quantities as they are read.
pub fn order_rows(raw: &RawTable, table: TableKind) -> ReconResult<Vec<OrderRow>> {
    require_columns(raw, table, &ORDER_COLUMNS)?;

    let rows = raw
        .rows
        .iter()
        .map(|record| {
            let extra: BTreeMap<String, String> = record
                .iter()
                .filter(|(column, _)| !ORDER_CONSUMED.contains(&column.as_str()))
                .map(|(column, value)| (column.clone(), value.clone()))
                .collect();

            OrderRow {
                notes: field(record, "Notes"),
                name: field(record, "Name"),
                ndc: normalize_ndc(&field(record, "NDC")),
                quantity: coerce_quantity(&field(record, "Quantity")),
                po_reference: optional_field(record, "POReferenceNumber"),
                extra,
            }
        })
        .collect();

    Ok(rows)
}

/// Build typed forecast rows from a raw table, normalizing NDCs.
pub fn forecast_rows(raw: &RawTable) -> ReconResult<Vec<ForecastRow>> {
    require_columns(raw, TableKind::Forecast, &FORECAST_COLUMNS)?;

    let rows = raw
        .rows
        .iter()
        .map(|record| {
            let metrics: BTreeMap<String, String> = record
                .iter()
                .filter(|(column, _)| !FORECAST_CONSUMED.contains(&column.as_str()))
                .map(|(column, value)| (column.clone(), value.clone()))
                .collect();

            ForecastRow {
                station_name: field(record, "StationName"),
                ndc: normalize_ndc(&field(record, "NDC")),
                drug_name: optional_field(record, "DrugName"),
                product_description: optional_field(record, "Product Description"),
                metrics,
            }
        })
        .collect();

    Ok(rows)
}

/// Coordinates the full comparison pipeline.
pub struct Reconciler;

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl Reconciler {
    /// Create a new reconciler.
    pub fn new() -> Self {
        Self
    }

    /// Reconcile already-ingested tables into the unified report.
    pub fn reconcile(
        &self,
        draft: &RawTable,
        submitted: &RawTable,
        forecast: &RawTable,
    ) -> ReconResult<UnifiedReport> {
        // Step 1: type and normalize the three tables
        let draft_rows = order_rows(draft, TableKind::Draft)?;
        let submitted_rows = order_rows(submitted, TableKind::Submitted)?;
        let forecasts = forecast_rows(forecast)?;
        info!(
            draft = draft_rows.len(),
            submitted = submitted_rows.len(),
            forecast = forecasts.len(),
            "tables normalized"
        );

        // Step 2: classify draft vs submitted
        let classified = classify(&draft_rows, &submitted_rows);

        // Step 3: enrich with forecast data (left join, fan-out on multi-match)
        let index = ForecastIndex::new(&forecasts);
        let records = enrich(classified.into_records(), &index);

        // Step 4: assemble the presentation
        Ok(UnifiedReport::new(records))
    }

    /// Load the three tables from disk and reconcile them in one call.
    pub fn reconcile_files<P: AsRef<Path>>(
        &self,
        draft: P,
        submitted: P,
        forecast: P,
    ) -> ReconResult<UnifiedReport> {
        let draft = read_table(draft)?;
        let submitted = read_table(submitted)?;
        let forecast = read_table(forecast)?;
        self.reconcile(&draft, &submitted, &forecast)
    }
}
