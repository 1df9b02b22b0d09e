//! Shared helpers for the integration tests.

#![allow(dead_code)]

pub mod fixtures;
pub mod page_assertions;

use fleetprint::{Margins, Page, PageGeometry, PageSize, PageUnit};
use fleetprint_style::FontSpec;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every character is `char_width` wide regardless of font.
pub fn monospace(char_width: f32) -> impl Fn(&str, &FontSpec) -> f32 {
    move |text: &str, _font: &FontSpec| text.chars().count() as f32 * char_width
}

/// Small point-based page: 400 x 300 pt, 20 pt margins, 15 pt minimum column.
pub fn small_pt_geometry() -> PageGeometry {
    PageGeometry::from_page_size(
        PageSize::Custom {
            width: 400.0,
            height: 300.0,
        },
        PageUnit::Pt,
    )
    .with_margins(Margins::all(20.0))
    .with_min_col_width(15.0)
}

pub fn total_body_rows(pages: &[Page]) -> usize {
    pages.iter().map(|p| p.body_rows().len()).sum()
}
