use crate::LayoutError;
use crate::config::LayoutConfig;
use crate::metrics::TextMetrics;
use fleetprint_style::PageGeometry;
use fleetprint_types::Table;
use itertools::Itertools;
use serde::Serialize;

/// Widths are compared against the usable width with this tolerance.
const WIDTH_EPSILON: f32 = 1e-3;

/// Allocated column widths for one table, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPlan {
    pub widths: Vec<f32>,
    /// x coordinate of the left edge of the first column.
    pub left: f32,
    pub usable_width: f32,
}

impl LayoutPlan {
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn total_width(&self) -> f32 {
        self.widths.iter().sum()
    }

    /// Left edge of every column.
    pub fn column_offsets(&self) -> Vec<f32> {
        self.widths
            .iter()
            .scan(self.left, |x, w| {
                let start = *x;
                *x += w;
                Some(start)
            })
            .collect()
    }

    /// Combined width of the columns in `range`.
    pub fn span_width(&self, range: std::ops::Range<usize>) -> f32 {
        self.widths[range].iter().sum()
    }
}

/// Computes column widths that fill the usable page width.
pub struct TableSolver<'a, M: ?Sized> {
    geometry: &'a PageGeometry,
    config: &'a LayoutConfig,
    metrics: &'a M,
}

impl<'a, M> TableSolver<'a, M>
where
    M: TextMetrics + ?Sized,
{
    pub fn new(geometry: &'a PageGeometry, config: &'a LayoutConfig, metrics: &'a M) -> Self {
        Self {
            geometry,
            config,
            metrics,
        }
    }

    /// Content-driven width of every column before fitting: the widest of the header and
    /// every body cell, plus padding, never below the minimum column width.
    pub fn desired_widths(&self, table: &Table) -> Vec<f32> {
        let header_font = self.geometry.header_font();
        let body_font = self.geometry.body_font();
        let mut widths: Vec<f32> = table
            .columns
            .iter()
            .map(|c| self.metrics.text_width(&c.name, &header_font))
            .collect();

        for row in &table.rows {
            for cell in &row.cells {
                if let Some(w) = widths.get_mut(cell.column) {
                    *w = w.max(self.metrics.text_width(&cell.text, &body_font));
                }
            }
        }

        widths
            .into_iter()
            .map(|w| (w + self.config.content_padding).max(self.geometry.min_col_width))
            .collect()
    }

    /// Allocates widths from the table content.
    pub fn resolve_widths(&self, table: &Table) -> Result<LayoutPlan, LayoutError> {
        self.geometry.validate()?;
        table.validate()?;

        let desired = self.desired_widths(table);
        let usable = self.geometry.usable_width();
        let widths = fit_widths(&desired, usable, self.geometry.min_col_width);

        log::debug!(
            "Allocated {} columns into {:.2} (desired {:.2}): [{}]",
            widths.len(),
            usable,
            desired.iter().sum::<f32>(),
            widths.iter().map(|w| format!("{:.2}", w)).join(", ")
        );

        Ok(self.plan(widths))
    }

    /// Allocates widths from relative weights, e.g. `[15, 65, 20]`.
    ///
    /// The weights are scaled to the usable width and then held to the same minimum and
    /// conservation rules as content-driven allocation.
    pub fn resolve_template(&self, relative: &[f32]) -> Result<LayoutPlan, LayoutError> {
        self.geometry.validate()?;

        let usable = self.geometry.usable_width();
        let total: f32 = relative.iter().filter(|w| w.is_finite() && **w > 0.0).sum();
        let scaled: Vec<f32> = if total > 0.0 {
            relative
                .iter()
                .map(|w| if w.is_finite() && *w > 0.0 { w / total * usable } else { 0.0 })
                .collect()
        } else {
            log::warn!("Column template has no positive weights; splitting the width evenly.");
            vec![usable / relative.len().max(1) as f32; relative.len()]
        };

        let min = self.geometry.min_col_width;
        let mut widths: Vec<f32> = scaled.into_iter().map(|w| w.max(min)).collect();
        correct_overflow(&mut widths, usable, min);
        Ok(self.plan(widths))
    }

    fn plan(&self, widths: Vec<f32>) -> LayoutPlan {
        LayoutPlan {
            widths,
            left: self.geometry.margins.left,
            usable_width: self.geometry.usable_width(),
        }
    }
}

/// Fits desired widths into `usable`.
///
/// Oversized tables shrink proportionally, then every column is raised back to `min`.
/// Undersized tables grow by the same absolute amount per column. A final pass removes
/// whatever the minimum pushed past `usable`.
pub fn fit_widths(desired: &[f32], usable: f32, min: f32) -> Vec<f32> {
    if desired.is_empty() {
        return Vec::new();
    }

    let sum: f32 = desired.iter().sum();
    let mut widths: Vec<f32> = if sum > usable {
        let scale = usable / sum;
        desired.iter().map(|w| (w * scale).max(min)).collect()
    } else {
        let extra = (usable - sum) / desired.len() as f32;
        desired.iter().map(|w| w + extra).collect()
    };

    correct_overflow(&mut widths, usable, min);
    widths
}

/// Shrinks `widths` until they sum to at most `usable`.
///
/// Only the excess above `min` is taken, proportionally, so no column drops below the
/// minimum. When `min` itself cannot fit every column, all columns scale uniformly.
fn correct_overflow(widths: &mut [f32], usable: f32, min: f32) {
    let sum: f32 = widths.iter().sum();
    if sum <= usable + WIDTH_EPSILON {
        return;
    }

    let n = widths.len() as f32;
    if n * min > usable {
        log::debug!(
            "Minimum column width {:.2} x {} exceeds usable width {:.2}; scaling uniformly.",
            min,
            widths.len(),
            usable
        );
        let scale = usable / sum;
        widths.iter_mut().for_each(|w| *w *= scale);
        return;
    }

    let overflow = sum - usable;
    let slack: f32 = widths.iter().map(|w| (w - min).max(0.0)).sum();
    if slack <= 0.0 {
        return;
    }
    for w in widths.iter_mut() {
        let excess = (*w - min).max(0.0);
        *w -= overflow * excess / slack;
    }
}
