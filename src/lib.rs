//! Report and invoice layout.
//!
//! Tables of typed records are laid out onto fixed-size pages of positioned cells,
//! text and rule lines. A rendering backend only has to draw the resulting
//! [`DrawInstruction`]s.

pub mod batch;
pub mod error;
pub mod request;

pub use error::PipelineError;
pub use fleetprint_finance as finance;
pub use fleetprint_layout as layout;
pub use fleetprint_layout::{
    CellRole, DrawInstruction, InvoiceDocument, InvoiceTemplate, LayoutConfig, Page, ReportHeader,
    StandardFontMetrics, SummaryDocument, SummarySection, SummaryTemplate, TextMetrics, WrapStrategy,
};
pub use fleetprint_style::{Margins, PageGeometry, PageSize, PageUnit};
pub use fleetprint_types::{CellValue, Column, ColumnType, Row, Table};

use chrono::NaiveDate;
#[cfg(feature = "rayon-executor")]
use rayon::prelude::*;

/// Lays out `table` with the default spacing for the geometry's unit.
///
/// `generated_on` adds the "Report Date" line under a non-empty title.
pub fn generate_table_report<M>(
    table: &Table,
    geometry: &PageGeometry,
    metrics: &M,
    title: &str,
    generated_on: Option<NaiveDate>,
) -> Result<Vec<Page>, PipelineError>
where
    M: TextMetrics + ?Sized,
{
    let config = LayoutConfig::for_unit(geometry.unit);
    let mut header = ReportHeader::new(title);
    header.generated_on = generated_on;
    Ok(fleetprint_layout::layout_report(table, geometry, &config, metrics, &header)?)
}

/// Lays out a single-page invoice with the default template for the geometry's unit.
pub fn generate_invoice<M>(
    document: &InvoiceDocument,
    geometry: &PageGeometry,
    metrics: &M,
) -> Result<Page, PipelineError>
where
    M: TextMetrics + ?Sized,
{
    let config = LayoutConfig::for_unit(geometry.unit);
    let template = InvoiceTemplate::for_unit(geometry.unit);
    Ok(fleetprint_layout::layout_invoice(document, geometry, &config, &template, metrics)?)
}

/// Lays out a sectioned summary with the default spacing for the geometry's unit.
pub fn generate_summary_report<M>(
    document: &SummaryDocument,
    geometry: &PageGeometry,
    metrics: &M,
) -> Result<Vec<Page>, PipelineError>
where
    M: TextMetrics + ?Sized,
{
    let config = LayoutConfig::for_unit(geometry.unit);
    let template = SummaryTemplate::for_unit(geometry.unit);
    Ok(fleetprint_layout::layout_summary(document, geometry, &config, &template, metrics)?)
}

/// One report in a batch.
#[derive(Debug, Clone)]
pub struct ReportJob {
    pub table: Table,
    pub header: ReportHeader,
}

/// Holds the page setup shared by every report and invoice it produces.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    geometry: PageGeometry,
    config: LayoutConfig,
    template: InvoiceTemplate,
    summary_template: SummaryTemplate,
    serial_numbers: bool,
}

impl Default for ReportEngine {
    fn default() -> Self {
        Self::new(PageGeometry::a4())
    }
}

impl ReportEngine {
    pub fn new(geometry: PageGeometry) -> Self {
        let unit = geometry.unit;
        Self {
            geometry,
            config: LayoutConfig::for_unit(unit),
            template: InvoiceTemplate::for_unit(unit),
            summary_template: SummaryTemplate::for_unit(unit),
            serial_numbers: false,
        }
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_wrap(mut self, wrap: WrapStrategy) -> Self {
        self.config.wrap = wrap;
        self
    }

    pub fn with_invoice_template(mut self, template: InvoiceTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_summary_template(mut self, template: SummaryTemplate) -> Self {
        self.summary_template = template;
        self
    }

    /// Prepends a numbered "SL No" column to every report.
    pub fn with_serial_numbers(mut self, enabled: bool) -> Self {
        self.serial_numbers = enabled;
        self
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    fn metrics(&self) -> StandardFontMetrics {
        StandardFontMetrics::new(self.geometry.unit)
    }

    /// Lays out a report measured with the built-in font metrics.
    pub fn report(&self, table: Table, header: &ReportHeader) -> Result<Vec<Page>, PipelineError> {
        self.report_with(table, header, &self.metrics())
    }

    pub fn report_with<M>(
        &self,
        table: Table,
        header: &ReportHeader,
        metrics: &M,
    ) -> Result<Vec<Page>, PipelineError>
    where
        M: TextMetrics + ?Sized,
    {
        let table = if self.serial_numbers {
            table.with_serial_numbers()
        } else {
            table
        };
        let pages =
            fleetprint_layout::layout_report(&table, &self.geometry, &self.config, metrics, header)?;
        log::info!(
            "Report '{}' laid out: {} rows on {} pages.",
            header.title,
            table.row_count(),
            pages.len()
        );
        Ok(pages)
    }

    pub fn invoice(&self, document: &InvoiceDocument) -> Result<Page, PipelineError> {
        self.invoice_with(document, &self.metrics())
    }

    pub fn invoice_with<M>(&self, document: &InvoiceDocument, metrics: &M) -> Result<Page, PipelineError>
    where
        M: TextMetrics + ?Sized,
    {
        let page = fleetprint_layout::layout_invoice(
            document,
            &self.geometry,
            &self.config,
            &self.template,
            metrics,
        )?;
        log::info!("Invoice {} laid out.", document.invoice_number);
        Ok(page)
    }

    pub fn summary(&self, document: &SummaryDocument) -> Result<Vec<Page>, PipelineError> {
        let pages = fleetprint_layout::layout_summary(
            document,
            &self.geometry,
            &self.config,
            &self.summary_template,
            &self.metrics(),
        )?;
        log::info!(
            "Summary '{}' laid out: {} sections on {} pages.",
            document.header.title,
            document.sections.len(),
            pages.len()
        );
        Ok(pages)
    }

    /// Lays out independent reports, in parallel when the `rayon-executor` feature is on.
    /// Results come back in job order.
    pub fn report_batch(&self, jobs: Vec<ReportJob>) -> Vec<Result<Vec<Page>, PipelineError>> {
        #[cfg(feature = "rayon-executor")]
        {
            jobs.into_par_iter()
                .map(|job| self.report(job.table, &job.header))
                .collect()
        }
        #[cfg(not(feature = "rayon-executor"))]
        {
            jobs.into_iter()
                .map(|job| self.report(job.table, &job.header))
                .collect()
        }
    }
}
