use fleetprint_style::PageUnit;
use fleetprint_style::dimension::PT_PER_MM;
use serde::{Deserialize, Serialize};

/// How cell text is turned into lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapStrategy {
    /// `ceil(text width / inner column width)` lines; the text is emitted unbroken and the
    /// rendering backend wraps it.
    #[default]
    Estimate,
    /// Greedy word wrap. Lines are pre-broken with `\n` and the real line count sizes the row.
    WordWrap,
}

/// Fixed offsets and spacing used by the report layout.
///
/// Lengths are in page units. `Default` is the millimetre preset; use
/// [`LayoutConfig::for_unit`] for geometries measured in points. Font sizes are in points
/// regardless of the unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Added to the measured content width of every column.
    ///
    /// Defaults to `6.0` mm.
    pub content_padding: f32,
    /// Inner horizontal padding of a body cell, per side.
    pub cell_padding_x: f32,
    /// Line height as a multiple of the body font size.
    pub line_spacing: f32,
    /// Extra space left below each body row.
    pub row_gap: f32,
    pub header_band_height: f32,
    /// Padding per side that header text must respect before it is truncated.
    pub header_text_padding: f32,
    pub truncate_headers: bool,
    pub title_font_size: f32,
    pub title_height: f32,
    pub date_font_size: f32,
    pub date_height: f32,
    /// Space between the title band and the first header band.
    pub title_gap: f32,
    /// Distance from the bottom margin line to the top of the footer band.
    pub footer_gap: f32,
    pub footer_height: f32,
    pub footer_font_size: f32,
    pub wrap: WrapStrategy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            content_padding: 6.0,
            cell_padding_x: 1.0,
            line_spacing: 1.2,
            row_gap: 0.0,
            header_band_height: 10.0,
            header_text_padding: 2.0,
            truncate_headers: true,
            title_font_size: 14.0,
            title_height: 10.0,
            date_font_size: 10.0,
            date_height: 5.0,
            title_gap: 10.0,
            footer_gap: 5.0,
            footer_height: 10.0,
            footer_font_size: 8.0,
            wrap: WrapStrategy::Estimate,
        }
    }
}

impl LayoutConfig {
    /// The default spacing expressed in `unit`.
    pub fn for_unit(unit: PageUnit) -> Self {
        let base = Self::default();
        let factor = match unit {
            PageUnit::Mm => return base,
            PageUnit::Pt => PT_PER_MM,
        };
        Self {
            content_padding: base.content_padding * factor,
            cell_padding_x: base.cell_padding_x * factor,
            row_gap: base.row_gap * factor,
            header_band_height: base.header_band_height * factor,
            header_text_padding: base.header_text_padding * factor,
            title_height: base.title_height * factor,
            date_height: base.date_height * factor,
            title_gap: base.title_gap * factor,
            footer_gap: base.footer_gap * factor,
            footer_height: base.footer_height * factor,
            ..base
        }
    }

    pub fn with_wrap(mut self, wrap: WrapStrategy) -> Self {
        self.wrap = wrap;
        self
    }

    /// Height of the title band including the gap below it.
    pub fn title_band_height(&self) -> f32 {
        self.title_height + self.date_height + self.title_gap
    }
}
