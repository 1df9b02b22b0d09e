//! The tabular data model handed to the layout engine.

use crate::error::TableError;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Header of the serial-number column inserted by [`Table::with_serial_numbers`].
pub const SERIAL_COLUMN: &str = "SL No";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
    DateTime,
    Boolean,
}

impl ColumnType {
    /// Numeric columns read better right-aligned.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type", default)]
    pub declared_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, declared_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            declared_type,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Text)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Number)
    }
}

/// An already-stringified value plus the index of the column it sits in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    pub column: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    /// Builds a row from display strings, assigning column indices in order.
    pub fn from_strings<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells = texts
            .into_iter()
            .enumerate()
            .map(|(column, text)| Cell {
                text: text.into(),
                column,
            })
            .collect();
        Self { cells }
    }

    /// Builds a row from typed values using their report display form.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = CellValue>,
    {
        Self::from_strings(values.into_iter().map(|v| v.display_string()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|c| c.text.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn push_values<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = CellValue>,
    {
        self.rows.push(Row::from_values(values));
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn header_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Checks the structural invariants: unique column names, one cell per column in
    /// every row, and cell `i` belonging to column `i`.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut seen = HashSet::with_capacity(self.columns.len());
        for col in &self.columns {
            if !seen.insert(col.name.as_str()) {
                return Err(TableError::DuplicateColumn(col.name.clone()));
            }
        }

        let expected = self.columns.len();
        for (row_idx, row) in self.rows.iter().enumerate() {
            if row.cells.len() != expected {
                return Err(TableError::CellCountMismatch {
                    row: row_idx,
                    expected,
                    found: row.cells.len(),
                });
            }
            if let Some((cell_idx, cell)) = row
                .cells
                .iter()
                .enumerate()
                .find(|(i, c)| c.column != *i)
            {
                return Err(TableError::CellColumnMismatch {
                    row: row_idx,
                    cell: cell_idx,
                    claimed: cell.column,
                });
            }
        }
        Ok(())
    }

    /// Returns a copy with a leading serial-number column numbered from 1.
    ///
    /// An existing serial-number column is dropped first so the numbering always
    /// matches the current row order.
    pub fn with_serial_numbers(self) -> Self {
        let existing = self.columns.iter().position(|c| c.name == SERIAL_COLUMN);

        let mut columns = self.columns;
        if let Some(pos) = existing {
            columns.remove(pos);
        }
        columns.insert(0, Column::number(SERIAL_COLUMN));

        let rows = self
            .rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let texts = row
                    .cells
                    .into_iter()
                    .enumerate()
                    .filter(|(idx, _)| Some(*idx) != existing)
                    .map(|(_, cell)| cell.text);
                Row::from_strings(std::iter::once((i + 1).to_string()).chain(texts))
            })
            .collect();

        Self { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicles() -> Table {
        let mut table = Table::new(vec![Column::text("Plate"), Column::number("Odometer")]);
        table.push_values([CellValue::from("BH-1042"), CellValue::Integer(182_400)]);
        table.push_values([CellValue::from("BH-2210"), CellValue::Missing]);
        table
    }

    #[test]
    fn valid_table_passes() {
        let table = vehicles();
        assert!(table.validate().is_ok());
        assert_eq!(table.rows[0].cells[1].text, "182,400");
        assert_eq!(table.rows[1].cells[1].text, "");
    }

    #[test]
    fn duplicate_column_is_rejected() {
        let table = Table::new(vec![Column::text("Plate"), Column::text("Plate")]);
        assert_eq!(
            table.validate(),
            Err(TableError::DuplicateColumn("Plate".to_string()))
        );
    }

    #[test]
    fn short_row_is_rejected() {
        let mut table = vehicles();
        table.push_row(Row::from_strings(["BH-9"]));
        assert_eq!(
            table.validate(),
            Err(TableError::CellCountMismatch {
                row: 2,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn misplaced_cell_is_rejected() {
        let mut table = vehicles();
        table.rows[0].cells[1].column = 0;
        assert!(matches!(
            table.validate(),
            Err(TableError::CellColumnMismatch { row: 0, cell: 1, claimed: 0 })
        ));
    }

    #[test]
    fn serial_numbers_lead_and_replace() {
        let table = vehicles().with_serial_numbers().with_serial_numbers();
        assert_eq!(
            table.header_names().collect::<Vec<_>>(),
            vec![SERIAL_COLUMN, "Plate", "Odometer"]
        );
        assert_eq!(table.rows[1].texts().collect::<Vec<_>>(), vec!["2", "BH-2210", ""]);
        assert!(table.validate().is_ok());
    }
}
