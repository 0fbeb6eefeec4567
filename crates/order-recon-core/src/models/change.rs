//! Change classification models for the unified report.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::forecast::ForecastRow;
use super::order::OrderRow;

/// How an order line differs between the draft and submitted tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChangeType {
    /// Present in both tables with unequal quantity
    QuantityChanged,
    /// Present only in the submitted table
    Added,
    /// Present only in the draft table
    Removed,
}

impl ChangeType {
    /// Label used in the report's ChangeType column.
    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::QuantityChanged => "Quantity Changed",
            ChangeType::Added => "Added",
            ChangeType::Removed => "Removed",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One unified report line: a classified order row plus its forecast match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeRecord {
    /// Classification of this line
    pub change_type: ChangeType,
    /// Origin row (draft side for Removed/QuantityChanged, submitted side for Added)
    pub order: OrderRow,
    /// Submitted-side quantity, present only for QuantityChanged
    pub submitted_quantity: Option<f64>,
    /// Matched forecast row, if any
    pub forecast: Option<ForecastRow>,
}

impl ChangeRecord {
    /// Flatten the record into named output cells.
    ///
    /// Order columns come first, then forecast columns. A forecast column
    /// whose name collides with an order column gets a "_Forecast" suffix
    /// instead of overwriting it.
    pub fn merged_cells(&self) -> Vec<(String, String)> {
        let mut cells: Vec<(String, String)> = Vec::new();

        cells.push(("ChangeType".into(), self.change_type.to_string()));
        if let Some(po) = &self.order.po_reference {
            cells.push(("POReferenceNumber".into(), po.clone()));
        }
        cells.push(("Notes".into(), self.order.notes.clone()));
        cells.push(("Name".into(), self.order.name.clone()));
        cells.push(("NDC".into(), self.order.ndc.clone()));
        cells.push(("Quantity".into(), format_quantity(self.order.quantity)));
        if let Some(quantity) = self.submitted_quantity {
            cells.push(("Submitted Quantity".into(), format_quantity(quantity)));
        }
        for (column, value) in &self.order.extra {
            cells.push((column.clone(), value.clone()));
        }

        if let Some(forecast) = &self.forecast {
            push_forecast_cell(&mut cells, "StationName", forecast.station_name.clone());
            push_forecast_cell(&mut cells, "NDC", forecast.ndc.clone());
            if let Some(drug_name) = &forecast.drug_name {
                push_forecast_cell(&mut cells, "DrugName", drug_name.clone());
            }
            if let Some(description) = &forecast.product_description {
                push_forecast_cell(&mut cells, "Product Description", description.clone());
            }
            for (column, value) in &forecast.metrics {
                push_forecast_cell(&mut cells, column, value.clone());
            }
        }

        cells
    }

    /// Look up one output cell by column name.
    pub fn cell(&self, column: &str) -> Option<String> {
        self.merged_cells()
            .into_iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}

/// Append a forecast-origin cell, suffixing the name on collision.
fn push_forecast_cell(cells: &mut Vec<(String, String)>, column: &str, value: String) {
    let name = if cells.iter().any(|(name, _)| name == column) {
        format!("{}_Forecast", column)
    } else {
        column.to_string()
    };
    cells.push((name, value));
}

/// Format a quantity the way the report displays it (5, not 5.0).
fn format_quantity(quantity: f64) -> String {
    format!("{}", quantity)
}
