//! Forecast enrichment via left outer join.

use std::collections::HashMap;

use crate::models::{ChangeRecord, ForecastRow};

/// Lookup index over the forecast table.
///
/// Keyed by (lowercase-trimmed station, normalized NDC). The forecast table
/// is always passed in explicitly; the index borrows it for one run.
pub struct ForecastIndex<'a> {
    rows: &'a [ForecastRow],
    by_station_ndc: HashMap<(String, String), Vec<usize>>,
}

impl<'a> ForecastIndex<'a> {
    /// Index a forecast table for joining.
    pub fn new(rows: &'a [ForecastRow]) -> Self {
        let mut by_station_ndc: HashMap<(String, String), Vec<usize>> = HashMap::new();
        for (idx, row) in rows.iter().enumerate() {
            by_station_ndc
                .entry((row.station_key(), row.ndc.trim().to_string()))
                .or_default()
                .push(idx);
        }
        Self {
            rows,
            by_station_ndc,
        }
    }

    /// All forecast rows matching a (station key, NDC) pair, in table order.
    pub fn matches(&self, station_key: &str, ndc: &str) -> Vec<&ForecastRow> {
        self.by_station_ndc
            .get(&(station_key.to_string(), ndc.to_string()))
            .map(|indices| indices.iter().map(|&idx| &self.rows[idx]).collect())
            .unwrap_or_default()
    }
}

/// Left-join classified records against the forecast index.
///
/// Every input record survives: no match leaves the forecast side empty,
/// and multiple matches fan out one output record per matching forecast row.
pub fn enrich(records: Vec<ChangeRecord>, index: &ForecastIndex<'_>) -> Vec<ChangeRecord> {
    let mut enriched = Vec::with_capacity(records.len());

    for record in records {
        let found = index.matches(&record.order.station_key(), record.order.ndc.trim());
        if found.is_empty() {
            enriched.push(record);
            continue;
        }

        for forecast in found {
            let mut fanned = record.clone();
            fanned.forecast = Some(forecast.clone());
            enriched.push(fanned);
        }
    }

    enriched
}
