//! Order table models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single line item from a draft or submitted order table.
///
/// Values are snapshots taken at ingestion: the NDC is already normalized
/// and the quantity already coerced. Nothing mutates a row after that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRow {
    /// Location/station name (the order sheets call this column "Notes")
    pub notes: String,
    /// Line item name
    pub name: String,
    /// National Drug Code, normalized (digits only, 11-digit zero-padded)
    pub ndc: String,
    /// Ordered quantity (unparseable source values coerce to 0)
    pub quantity: f64,
    /// Purchase order reference, when the sheet carries one
    pub po_reference: Option<String>,
    /// Remaining free-form columns, preserved for the merged output
    pub extra: BTreeMap<String, String>,
}

impl OrderRow {
    /// Lowercase-trimmed station key used for matching and enrichment.
    pub fn station_key(&self) -> String {
        self.notes.trim().to_lowercase()
    }
}
