//! Report assembly: title band, paginated table and numbered footers.

use crate::LayoutError;
use crate::algorithms::table_solver::{LayoutPlan, TableSolver};
use crate::config::LayoutConfig;
use crate::elements::{CellRole, DrawInstruction, Page};
use crate::metrics::TextMetrics;
use crate::paginator::Paginator;
use chrono::NaiveDate;
use fleetprint_style::{FontSpec, PageGeometry, TextAlign};
use fleetprint_types::{Rect, Table};
use serde::{Deserialize, Serialize};

/// Stands in for the page count until every page has been emitted.
pub const PAGE_COUNT_TOKEN: &str = "{nb}";

/// Title band content. An empty title suppresses the band entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHeader {
    #[serde(default)]
    pub title: String,
    /// Printed as "Report Date: YYYY-MM-DD" under the title.
    #[serde(default)]
    pub generated_on: Option<NaiveDate>,
    /// Appended to every footer as "Page X/N - suffix".
    #[serde(default)]
    pub footer_suffix: Option<String>,
}

impl ReportHeader {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            generated_on: None,
            footer_suffix: None,
        }
    }

    pub fn dated(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    pub fn with_footer_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.footer_suffix = Some(suffix.into());
        self
    }

    pub fn has_title_band(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Builds complete report pages from a table.
pub struct DocumentAssembler<'a, M: ?Sized> {
    geometry: &'a PageGeometry,
    config: &'a LayoutConfig,
    metrics: &'a M,
}

impl<'a, M> DocumentAssembler<'a, M>
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

    pub fn plan(&self, table: &Table) -> Result<LayoutPlan, LayoutError> {
        TableSolver::new(self.geometry, self.config, self.metrics).resolve_widths(table)
    }

    pub fn assemble(&self, table: &Table, header: &ReportHeader) -> Result<Vec<Page>, LayoutError> {
        let plan = self.plan(table)?;

        let mut first_top = self.geometry.margins.top;
        let title_band = if header.has_title_band() {
            let band = title_band(self.geometry, self.config, header);
            first_top += self.config.title_band_height();
            band
        } else {
            Vec::new()
        };

        let mut pages =
            Paginator::new(table, &plan, self.geometry, self.config, self.metrics).paginate(first_top);

        if let Some(first) = pages.first_mut() {
            first.instructions.splice(0..0, title_band);
        }
        for page in &mut pages {
            page.push(page_footer(self.geometry, self.config, page.index, header));
        }
        finalize_page_count(&mut pages);
        Ok(pages)
    }
}

/// Title and optional report date, from the top margin of the first page.
pub(crate) fn title_band(
    geometry: &PageGeometry,
    config: &LayoutConfig,
    header: &ReportHeader,
) -> Vec<DrawInstruction> {
    let x = geometry.margins.left;
    let y = geometry.margins.top;
    let width = geometry.usable_width();
    let family = geometry.font_family.clone();

    let mut band = vec![DrawInstruction::Cell {
        rect: Rect::new(x, y, width, config.title_height),
        text: header.title.clone(),
        align: TextAlign::Center,
        font: FontSpec::new(family.clone(), config.title_font_size).bold(),
        border: false,
        role: CellRole::Title,
    }];
    if let Some(date) = header.generated_on {
        band.push(DrawInstruction::Cell {
            rect: Rect::new(x, y + config.title_height, width, config.date_height),
            text: format!("Report Date: {}", date.format("%Y-%m-%d")),
            align: TextAlign::Center,
            font: FontSpec::new(family, config.date_font_size),
            border: false,
            role: CellRole::ReportDate,
        });
    }
    band
}

/// Below the bottom-margin line, pulled up when a narrow margin would push the band
/// past the page edge.
fn footer_top(geometry: &PageGeometry, config: &LayoutConfig) -> f32 {
    let below_margin = geometry.content_bottom() + config.footer_gap;
    below_margin.min(geometry.page_height - config.footer_height)
}

/// "Page X/{nb}" footer, with the header's suffix when it has one.
pub(crate) fn page_footer(
    geometry: &PageGeometry,
    config: &LayoutConfig,
    index: usize,
    header: &ReportHeader,
) -> DrawInstruction {
    let mut text = format!("Page {}/{}", index, PAGE_COUNT_TOKEN);
    if let Some(suffix) = header.footer_suffix.as_deref().filter(|s| !s.trim().is_empty()) {
        text.push_str(" - ");
        text.push_str(suffix);
    }
    DrawInstruction::Cell {
        rect: Rect::new(
            geometry.margins.left,
            footer_top(geometry, config),
            geometry.usable_width(),
            config.footer_height,
        ),
        text,
        align: TextAlign::Center,
        font: FontSpec::new(geometry.font_family.clone(), config.footer_font_size).italic(),
        border: false,
        role: CellRole::Footer,
    }
}

/// Replaces the page-count token in every footer now that the total is known.
pub fn finalize_page_count(pages: &mut [Page]) {
    let total = pages.len().to_string();
    for page in pages.iter_mut() {
        page.substitute(CellRole::Footer, PAGE_COUNT_TOKEN, &total);
    }
}

/// Lays out `table` as a complete report.
pub fn layout_report<M>(
    table: &Table,
    geometry: &PageGeometry,
    config: &LayoutConfig,
    metrics: &M,
    header: &ReportHeader,
) -> Result<Vec<Page>, LayoutError>
where
    M: TextMetrics + ?Sized,
{
    DocumentAssembler::new(geometry, config, metrics).assemble(table, header)
}
