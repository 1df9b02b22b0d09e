use thiserror::Error;

/// Structural problems with a [`crate::Table`] that prevent any layout work.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Row {row} has {found} cells but the table has {expected} columns.")]
    CellCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Cell {cell} of row {row} claims column {claimed}.")]
    CellColumnMismatch {
        row: usize,
        cell: usize,
        claimed: usize,
    },
    #[error("Column name '{0}' appears more than once.")]
    DuplicateColumn(String),
}
