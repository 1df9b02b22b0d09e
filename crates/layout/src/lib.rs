use fleetprint_finance::FinanceError;
use fleetprint_style::GeometryError;
use fleetprint_types::TableError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid table: {0}")]
    InvalidTable(#[from] TableError),
    #[error("Degenerate page geometry: {0}")]
    DegenerateGeometry(#[from] GeometryError),
    #[error("Content needs to reach {needed:.2} but the page allows only {available:.2}.")]
    Overflow { needed: f32, available: f32 },
    #[error("Column template has {found} columns but the table has {expected}.")]
    TemplateMismatch { expected: usize, found: usize },
    #[error(transparent)]
    Amount(#[from] FinanceError),
}

pub mod algorithms;
pub mod config;
pub mod document;
pub mod elements;
pub mod fonts;
pub mod invoice;
pub mod metrics;
pub mod paginator;
pub mod summary;
pub mod text;

pub use self::algorithms::row_height::{ResolvedRow, RowHeightResolver, resolve_row_height};
pub use self::algorithms::table_solver::{LayoutPlan, TableSolver, fit_widths};
pub use self::config::{LayoutConfig, WrapStrategy};
pub use self::document::{DocumentAssembler, PAGE_COUNT_TOKEN, ReportHeader, layout_report};
pub use self::elements::{CellRole, DrawInstruction, Page};
pub use self::fonts::StandardFontMetrics;
pub use self::invoice::{InvoiceCompositor, InvoiceDocument, InvoiceTemplate, layout_invoice};
pub use self::metrics::TextMetrics;
pub use self::paginator::Paginator;
pub use self::summary::{
    SummaryAssembler, SummaryDocument, SummarySection, SummaryTemplate, layout_summary,
};

#[cfg(test)]
mod paginator_test;
#[cfg(test)]
mod summary_test;
#[cfg(test)]
pub(crate) mod test_utils;
