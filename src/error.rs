// src/error.rs
use fleetprint_layout::LayoutError;
use thiserror::Error;

/// A comprehensive error type for report and invoice generation.
///
/// Amount errors surface through [`LayoutError::Amount`].
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Failed to parse JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{failed} of {total} batch jobs failed")]
    Batch { failed: usize, total: usize },
}
