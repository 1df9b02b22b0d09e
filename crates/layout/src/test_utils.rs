use crate::config::LayoutConfig;
use fleetprint_style::{FontSpec, Margins, PageGeometry, PageSize, PageUnit};
use fleetprint_types::{Column, Row, Table};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every character is `char_width` wide regardless of font.
pub fn monospace(char_width: f32) -> impl Fn(&str, &FontSpec) -> f32 {
    move |text: &str, _font: &FontSpec| text.chars().count() as f32 * char_width
}

/// A point-based page with equal margins and 10 pt fonts.
pub fn pt_geometry(width: f32, height: f32, margin: f32) -> PageGeometry {
    PageGeometry::from_page_size(PageSize::Custom { width, height }, PageUnit::Pt)
        .with_margins(Margins::all(margin))
        .with_min_col_width(15.0)
}

/// Point config with a fixed header band height.
pub fn pt_config(header_band_height: f32) -> LayoutConfig {
    LayoutConfig {
        header_band_height,
        ..LayoutConfig::for_unit(PageUnit::Pt)
    }
}

/// A table whose cell text encodes its position, e.g. `r3c1`.
pub fn numbered_table(rows: usize, columns: usize) -> Table {
    let cols = (0..columns).map(|c| Column::text(format!("Column {}", c))).collect();
    let mut table = Table::new(cols);
    for r in 0..rows {
        table.push_row(Row::from_strings((0..columns).map(|c| format!("r{}c{}", r, c))));
    }
    table
}

pub fn table_from(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::with_rows(
        headers.iter().map(|h| Column::text(*h)).collect(),
        rows.iter().map(|r| Row::from_strings(r.iter().copied())).collect(),
    )
}
