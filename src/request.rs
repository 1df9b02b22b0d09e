//! JSON request documents accepted by the command line tool.

use crate::error::PipelineError;
use fleetprint_layout::{InvoiceDocument, SummaryDocument};
use fleetprint_types::{CellValue, Column, Row, Table};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One input row: positional values, or a record keyed by column name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RowInput {
    Values(Vec<CellValue>),
    Record(HashMap<String, CellValue>),
}

/// A table report request.
///
/// ```json
/// { "title": "Vehicles",
///   "columns": [{ "name": "Plate" }, { "name": "Mileage", "type": "number" }],
///   "rows": [["B 1234", 120500], { "Plate": "C 77", "Mileage": 98000 }] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TableRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<RowInput>,
}

impl TableRequest {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        log::debug!("Loading table request from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Stringifies every value into a [`Table`]. Record rows may omit columns; positional
    /// rows must match the column count, which the layout checks.
    pub fn into_table(self) -> Table {
        let columns = self.columns;
        let rows = self
            .rows
            .into_iter()
            .map(|row| match row {
                RowInput::Values(values) => Row::from_values(values),
                RowInput::Record(mut record) => Row::from_values(
                    columns
                        .iter()
                        .map(|c| record.remove(&c.name).unwrap_or(CellValue::Missing)),
                ),
            })
            .collect();
        Table::with_rows(columns, rows)
    }
}

pub fn load_invoice(path: impl AsRef<Path>) -> Result<InvoiceDocument, PipelineError> {
    let path = path.as_ref();
    log::debug!("Loading invoice from {}", path.display());
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// Reads a sectioned summary: the header fields alongside a `sections` array.
///
/// ```json
/// { "title": "Global Management Report", "footerSuffix": "Global Management Report",
///   "sections": [{ "heading": "Key Metrics", "lines": ["- Total Trips: 42"] }] }
/// ```
pub fn load_summary(path: impl AsRef<Path>) -> Result<SummaryDocument, PipelineError> {
    let path = path.as_ref();
    log::debug!("Loading summary from {}", path.display());
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}
