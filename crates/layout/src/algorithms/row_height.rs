use crate::algorithms::table_solver::LayoutPlan;
use crate::config::{LayoutConfig, WrapStrategy};
use crate::metrics::TextMetrics;
use crate::text::wrap_words;
use fleetprint_style::{FontSpec, PageGeometry};
use fleetprint_types::Row;

/// Absorbs float noise so text that exactly fills a column stays on one line.
const LINE_EPSILON: f32 = 1e-4;

/// A body row after line breaking: final cell texts and the row height.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRow {
    pub height: f32,
    pub lines: Vec<usize>,
    /// Cell texts as they should be drawn. Pre-broken with `\n` under word wrap.
    pub texts: Vec<String>,
}

impl ResolvedRow {
    pub fn max_lines(&self) -> usize {
        self.lines.iter().copied().max().unwrap_or(1)
    }
}

/// Line height for body text: font size in page units times the line spacing.
pub fn body_line_height(geometry: &PageGeometry, config: &LayoutConfig) -> f32 {
    geometry.pt_to_unit(geometry.body_font_size) * config.line_spacing
}

/// `max(1, ceil(text_width / inner_width))`.
pub fn estimate_lines(text_width: f32, inner_width: f32) -> usize {
    if text_width <= 0.0 {
        return 1;
    }
    if inner_width <= 0.0 {
        return usize::MAX;
    }
    ((text_width / inner_width) - LINE_EPSILON).ceil().max(1.0) as usize
}

/// A column too narrow for a single glyph still takes one glyph per line.
fn capped_estimate(text: &str, text_width: f32, inner_width: f32) -> usize {
    estimate_lines(text_width, inner_width).min(text.chars().count().max(1))
}

/// Row height from the width estimate: `line_height * max(lines)` over the row's cells.
pub fn resolve_row_height<M>(
    row: &Row,
    plan: &LayoutPlan,
    metrics: &M,
    font: &FontSpec,
    line_height: f32,
    cell_padding_x: f32,
) -> f32
where
    M: TextMetrics + ?Sized,
{
    let max_lines = row
        .cells
        .iter()
        .filter_map(|cell| {
            let width = plan.widths.get(cell.column)?;
            let inner = width - 2.0 * cell_padding_x;
            Some(capped_estimate(&cell.text, metrics.text_width(&cell.text, font), inner))
        })
        .max()
        .unwrap_or(1);
    line_height * max_lines as f32
}

/// Breaks and measures rows with a fixed font, plan and wrap strategy.
pub struct RowHeightResolver<'a, M: ?Sized> {
    plan: &'a LayoutPlan,
    metrics: &'a M,
    font: FontSpec,
    line_height: f32,
    cell_padding_x: f32,
    wrap: WrapStrategy,
}

impl<'a, M> RowHeightResolver<'a, M>
where
    M: TextMetrics + ?Sized,
{
    pub fn new(
        plan: &'a LayoutPlan,
        metrics: &'a M,
        font: FontSpec,
        line_height: f32,
        config: &LayoutConfig,
    ) -> Self {
        Self {
            plan,
            metrics,
            font,
            line_height,
            cell_padding_x: config.cell_padding_x,
            wrap: config.wrap,
        }
    }

    /// Resolver for body rows of a report laid out with `geometry`.
    pub fn for_body(
        plan: &'a LayoutPlan,
        metrics: &'a M,
        geometry: &PageGeometry,
        config: &LayoutConfig,
    ) -> Self {
        Self::new(plan, metrics, geometry.body_font(), body_line_height(geometry, config), config)
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn resolve(&self, row: &Row) -> ResolvedRow {
        let (lines, texts): (Vec<usize>, Vec<String>) = row
            .cells
            .iter()
            .map(|cell| {
                let width = self.plan.widths.get(cell.column).copied().unwrap_or(0.0);
                self.break_cell(&cell.text, width - 2.0 * self.cell_padding_x)
            })
            .unzip();
        let max_lines = lines.iter().copied().max().unwrap_or(1);
        ResolvedRow {
            height: self.line_height * max_lines as f32,
            lines,
            texts,
        }
    }

    fn break_cell(&self, text: &str, inner: f32) -> (usize, String) {
        match self.wrap {
            WrapStrategy::Estimate => {
                let width = self.metrics.text_width(text, &self.font);
                (capped_estimate(text, width, inner), text.to_string())
            }
            WrapStrategy::WordWrap => {
                let lines = wrap_words(text, inner, &self.font, self.metrics);
                (lines.len().max(1), lines.join("\n"))
            }
        }
    }
}
