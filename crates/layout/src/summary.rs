//! Sectioned summary reports: a title band, then headed lists of text lines flowing
//! across as many pages as they need, with numbered footers.

use crate::LayoutError;
use crate::algorithms::pagination::check_row_fit;
use crate::config::LayoutConfig;
use crate::document::{ReportHeader, finalize_page_count, page_footer, title_band};
use crate::elements::{CellRole, DrawInstruction, Page};
use crate::metrics::TextMetrics;
use crate::text::wrap_words;
use fleetprint_style::dimension::PT_PER_MM;
use fleetprint_style::{FontSpec, PageGeometry, PageUnit, TextAlign};
use fleetprint_types::Rect;
use serde::{Deserialize, Serialize};

/// One headed block of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySection {
    pub heading: String,
    #[serde(default)]
    pub lines: Vec<String>,
    /// Shown in place of the lines when there are none, e.g. "No trip data available."
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl SummarySection {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            ..Self::default()
        }
    }

    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    /// Adds a `- label: value` line.
    pub fn entry(self, label: &str, value: impl std::fmt::Display) -> Self {
        self.line(format!("- {}: {}", label, value))
    }

    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    fn display_lines(&self) -> Vec<&str> {
        if self.lines.is_empty() {
            self.placeholder.as_deref().into_iter().collect()
        } else {
            self.lines.iter().map(String::as_str).collect()
        }
    }
}

/// A management-style summary: header band plus sections, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDocument {
    #[serde(flatten)]
    pub header: ReportHeader,
    #[serde(default)]
    pub sections: Vec<SummarySection>,
}

impl SummaryDocument {
    pub fn new(header: ReportHeader) -> Self {
        Self {
            header,
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, section: SummarySection) -> Self {
        self.sections.push(section);
        self
    }
}

/// Heading and line spacing of summary sections, in page units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryTemplate {
    pub heading_font_size: f32,
    pub heading_height: f32,
    pub line_font_size: f32,
    pub line_height: f32,
    /// Space left after the last line of a section.
    pub section_gap: f32,
}

impl Default for SummaryTemplate {
    fn default() -> Self {
        Self {
            heading_font_size: 14.0,
            heading_height: 10.0,
            line_font_size: 10.0,
            line_height: 7.0,
            section_gap: 5.0,
        }
    }
}

impl SummaryTemplate {
    pub fn for_unit(unit: PageUnit) -> Self {
        let base = Self::default();
        let f = match unit {
            PageUnit::Mm => return base,
            PageUnit::Pt => PT_PER_MM,
        };
        Self {
            heading_height: base.heading_height * f,
            line_height: base.line_height * f,
            section_gap: base.section_gap * f,
            ..base
        }
    }
}

/// Flows [`SummarySection`]s down the page, breaking with the same fit test as table rows.
pub struct SummaryAssembler<'a, M: ?Sized> {
    geometry: &'a PageGeometry,
    config: &'a LayoutConfig,
    template: &'a SummaryTemplate,
    metrics: &'a M,
}

/// The open page and where the next block goes.
struct Flow {
    finished: Vec<Page>,
    page: Page,
    cursor_y: f32,
    /// Cursor position on an empty page; nothing is moved to a new page from here.
    page_top: f32,
}

impl Flow {
    fn is_at_page_top(&self) -> bool {
        self.cursor_y <= self.page_top + f32::EPSILON
    }

    fn new_page(&mut self, top: f32) {
        let next = Page::new(self.page.index + 1);
        self.finished.push(std::mem::replace(&mut self.page, next));
        self.cursor_y = top;
        self.page_top = top;
    }

    fn finish(mut self) -> Vec<Page> {
        self.finished.push(self.page);
        self.finished
    }
}

impl<'a, M> SummaryAssembler<'a, M>
where
    M: TextMetrics + ?Sized,
{
    pub fn new(
        geometry: &'a PageGeometry,
        config: &'a LayoutConfig,
        template: &'a SummaryTemplate,
        metrics: &'a M,
    ) -> Self {
        Self {
            geometry,
            config,
            template,
            metrics,
        }
    }

    pub fn assemble(&self, document: &SummaryDocument) -> Result<Vec<Page>, LayoutError> {
        self.geometry.validate()?;
        let t = self.template;
        let top = self.geometry.margins.top;
        let limit = self.geometry.content_bottom();

        let mut flow = Flow {
            finished: Vec::new(),
            page: Page::new(1),
            cursor_y: top,
            page_top: top,
        };
        if document.header.has_title_band() {
            let band = title_band(self.geometry, self.config, &document.header);
            flow.page.instructions.extend(band);
            flow.cursor_y += self.config.title_band_height();
            flow.page_top = flow.cursor_y;
        }

        let heading_font = self.font(t.heading_font_size).bold();
        let line_font = self.font(t.line_font_size);
        let width = self.geometry.usable_width();

        for (index, section) in document.sections.iter().enumerate() {
            let lines: Vec<String> = section
                .display_lines()
                .into_iter()
                .flat_map(|line| wrap_words(line, width, &line_font, self.metrics))
                .collect();

            // A heading never ends a page on its own.
            let first_line = if lines.is_empty() { 0.0 } else { t.line_height };
            self.break_if_needed(&mut flow, t.heading_height + first_line, limit, top);
            self.place(&mut flow, &section.heading, t.heading_height, &heading_font, CellRole::SectionHeading(index));

            for line in &lines {
                self.break_if_needed(&mut flow, t.line_height, limit, top);
                self.place(&mut flow, line, t.line_height, &line_font, CellRole::SectionLine(index));
            }
            flow.cursor_y += t.section_gap;
        }

        let mut pages = flow.finish();
        for page in &mut pages {
            page.push(page_footer(self.geometry, self.config, page.index, &document.header));
        }
        finalize_page_count(&mut pages);

        log::debug!(
            "Summary '{}' laid out: {} sections on {} pages.",
            document.header.title,
            document.sections.len(),
            pages.len()
        );
        Ok(pages)
    }

    fn font(&self, size: f32) -> FontSpec {
        FontSpec::new(self.geometry.font_family.clone(), size)
    }

    fn break_if_needed(&self, flow: &mut Flow, height: f32, limit: f32, top: f32) {
        if !check_row_fit(flow.cursor_y, height, limit).should_break {
            return;
        }
        if flow.is_at_page_top() {
            log::warn!(
                "Summary block of height {:.2} does not fit an empty page (limit {:.2}); placing it anyway.",
                height,
                limit
            );
            return;
        }
        flow.new_page(top);
    }

    fn place(&self, flow: &mut Flow, text: &str, height: f32, font: &FontSpec, role: CellRole) {
        let rect = Rect::new(self.geometry.margins.left, flow.cursor_y, self.geometry.usable_width(), height);
        flow.page.push(DrawInstruction::Cell {
            rect,
            text: text.to_string(),
            align: TextAlign::Left,
            font: font.clone(),
            border: false,
            role,
        });
        flow.cursor_y += height;
    }
}

/// Lays out `document` as a complete multi-page summary.
pub fn layout_summary<M>(
    document: &SummaryDocument,
    geometry: &PageGeometry,
    config: &LayoutConfig,
    template: &SummaryTemplate,
    metrics: &M,
) -> Result<Vec<Page>, LayoutError>
where
    M: TextMetrics + ?Sized,
{
    SummaryAssembler::new(geometry, config, template, metrics).assemble(document)
}
