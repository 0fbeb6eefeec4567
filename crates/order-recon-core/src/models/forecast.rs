//! Forecast report models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single row from the forecast report.
///
/// Read-only once ingested; queried by (lowercased station, NDC) during
/// enrichment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastRow {
    /// Station the forecast line applies to
    pub station_name: String,
    /// National Drug Code, normalized (digits only, 11-digit zero-padded)
    pub ndc: String,
    /// Drug name, when the report carries one
    pub drug_name: Option<String>,
    /// Product description, when the report carries one
    pub product_description: Option<String>,
    /// Quantity metric columns (Required Qty, On Hand Qty, PAR Min, ...)
    pub metrics: BTreeMap<String, String>,
}

impl ForecastRow {
    /// Lowercase-trimmed station key used for the enrichment join.
    pub fn station_key(&self) -> String {
        self.station_name.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_key_matches_order_side() {
        let row = ForecastRow {
            station_name: "STATION A".into(),
            ndc: "00069024210".into(),
            drug_name: Some("Amoxicillin".into()),
            product_description: None,
            metrics: BTreeMap::new(),
        };
        assert_eq!(row.station_key(), "station a");
    }
}
