//! Single-page tax invoice layout.
//!
//! The page is a fixed template. Only the particulars table is measured: its widths come
//! from the column allocator in template mode and its row heights from the row resolver.
//! Content that would run into the signature block is reported as
//! [`LayoutError::Overflow`] rather than continued on another page.

mod document;

pub use document::{BillTo, CompanyInfo, InvoiceDocument, LineItem, ParticularsLine};

use crate::LayoutError;
use crate::algorithms::pagination::check_row_fit;
use crate::algorithms::row_height::RowHeightResolver;
use crate::algorithms::table_solver::{LayoutPlan, TableSolver};
use crate::config::LayoutConfig;
use crate::elements::{CellRole, DrawInstruction, Page};
use crate::metrics::TextMetrics;
use crate::text::wrap_words;
use fleetprint_finance::{Totals, amount_in_words};
use fleetprint_style::dimension::PT_PER_MM;
use fleetprint_style::{FontSpec, PageGeometry, PageUnit, TextAlign};
use fleetprint_types::{Column, Rect, Row, Table};
use serde::{Deserialize, Serialize};

/// Relative widths of SR.NO, Particulars, Quantity, Rate, Amount, VAT and Total.
pub const DEFAULT_COLUMN_TEMPLATE: [f32; 7] = [15.0, 65.0, 20.0, 25.0, 25.0, 25.0, 30.0];

/// Fixed offsets of the invoice template, in page units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceTemplate {
    /// Top of the company block, from the page top.
    pub company_top: f32,
    pub block_line_height: f32,
    pub company_font_size: f32,
    /// Space between the company block and the title.
    pub title_gap: f32,
    pub title_font_size: f32,
    pub title_height: f32,
    pub section_gap: f32,
    pub detail_label_width: f32,
    pub detail_value_width: f32,
    pub detail_line_height: f32,
    pub particulars_header_height: f32,
    pub particulars_line_height: f32,
    pub particulars_min_row_height: f32,
    pub totals_row_height: f32,
    /// Space above the amount-in-words line.
    pub words_gap: f32,
    pub words_line_height: f32,
    pub remarks_line_height: f32,
    /// Distance from the page bottom to the top of the signature block.
    pub signature_from_bottom: f32,
    /// Distance from the signature captions down to the rule lines.
    pub signature_rule_offset: f32,
    pub signature_rule_width: f32,
    pub footer_from_bottom: f32,
    pub footer_height: f32,
    pub footer_font_size: f32,
    pub column_template: Vec<f32>,
}

impl Default for InvoiceTemplate {
    fn default() -> Self {
        Self {
            company_top: 25.0,
            block_line_height: 5.0,
            company_font_size: 9.0,
            title_gap: 10.0,
            title_font_size: 24.0,
            title_height: 20.0,
            section_gap: 5.0,
            detail_label_width: 30.0,
            detail_value_width: 60.0,
            detail_line_height: 6.0,
            particulars_header_height: 10.0,
            particulars_line_height: 5.0,
            particulars_min_row_height: 10.0,
            totals_row_height: 7.0,
            words_gap: 10.0,
            words_line_height: 7.0,
            remarks_line_height: 5.0,
            signature_from_bottom: 65.0,
            signature_rule_offset: 15.0,
            signature_rule_width: 50.0,
            footer_from_bottom: 15.0,
            footer_height: 10.0,
            footer_font_size: 8.0,
            column_template: DEFAULT_COLUMN_TEMPLATE.to_vec(),
        }
    }
}

impl InvoiceTemplate {
    /// The default template expressed in `unit`. Font sizes stay in points.
    pub fn for_unit(unit: PageUnit) -> Self {
        let base = Self::default();
        let f = match unit {
            PageUnit::Mm => return base,
            PageUnit::Pt => PT_PER_MM,
        };
        Self {
            company_top: base.company_top * f,
            block_line_height: base.block_line_height * f,
            title_gap: base.title_gap * f,
            title_height: base.title_height * f,
            section_gap: base.section_gap * f,
            detail_label_width: base.detail_label_width * f,
            detail_value_width: base.detail_value_width * f,
            detail_line_height: base.detail_line_height * f,
            particulars_header_height: base.particulars_header_height * f,
            particulars_line_height: base.particulars_line_height * f,
            particulars_min_row_height: base.particulars_min_row_height * f,
            totals_row_height: base.totals_row_height * f,
            words_gap: base.words_gap * f,
            words_line_height: base.words_line_height * f,
            remarks_line_height: base.remarks_line_height * f,
            signature_from_bottom: base.signature_from_bottom * f,
            signature_rule_offset: base.signature_rule_offset * f,
            signature_rule_width: base.signature_rule_width * f,
            footer_from_bottom: base.footer_from_bottom * f,
            footer_height: base.footer_height * f,
            ..base
        }
    }
}

/// Places an [`InvoiceDocument`] on one page.
pub struct InvoiceCompositor<'a, M: ?Sized> {
    geometry: &'a PageGeometry,
    config: &'a LayoutConfig,
    template: &'a InvoiceTemplate,
    metrics: &'a M,
}

/// Vertical cursor with the single-page limit attached.
struct Cursor {
    y: f32,
    limit: f32,
}

impl Cursor {
    /// Claims `height` below the cursor, failing when it would cross the limit.
    fn claim(&mut self, height: f32) -> Result<f32, LayoutError> {
        if check_row_fit(self.y, height, self.limit).should_break {
            return Err(LayoutError::Overflow {
                needed: self.y + height,
                available: self.limit,
            });
        }
        let top = self.y;
        self.y += height;
        Ok(top)
    }
}

impl<'a, M> InvoiceCompositor<'a, M>
where
    M: TextMetrics + ?Sized,
{
    pub fn new(
        geometry: &'a PageGeometry,
        config: &'a LayoutConfig,
        template: &'a InvoiceTemplate,
        metrics: &'a M,
    ) -> Self {
        Self {
            geometry,
            config,
            template,
            metrics,
        }
    }

    /// The lowest y coordinate invoice content may reach.
    pub fn content_limit(&self) -> f32 {
        let signature_top = self.geometry.page_height - self.template.signature_from_bottom;
        self.geometry.content_bottom().min(signature_top)
    }

    pub fn compose(&self, invoice: &InvoiceDocument) -> Result<Page, LayoutError> {
        self.geometry.validate()?;
        let totals = invoice.totals()?;

        let mut page = Page::new(1);
        let mut cursor = Cursor {
            y: self.template.company_top,
            limit: self.content_limit(),
        };

        self.company_block(&mut page, &mut cursor, invoice)?;
        self.title(&mut page, &mut cursor)?;
        self.details(&mut page, &mut cursor, invoice)?;
        self.particulars(&mut page, &mut cursor, invoice, &totals)?;
        self.words_and_remarks(&mut page, &mut cursor, invoice, &totals)?;
        self.signature(&mut page, invoice);
        self.footer(&mut page, invoice);

        log::debug!(
            "Invoice {} composed with {} items; content ends at {:.2} of {:.2}.",
            invoice.invoice_number,
            invoice.items.len(),
            cursor.y,
            cursor.limit
        );
        Ok(page)
    }

    fn font(&self, size: f32) -> FontSpec {
        FontSpec::new(self.geometry.font_family.clone(), size)
    }

    fn company_block(
        &self,
        page: &mut Page,
        cursor: &mut Cursor,
        invoice: &InvoiceDocument,
    ) -> Result<(), LayoutError> {
        let font = self.font(self.template.company_font_size);
        let x = self.geometry.margins.left;
        let width = self.geometry.usable_width();
        for line in invoice.company.block_lines() {
            let y = cursor.claim(self.template.block_line_height)?;
            page.push(DrawInstruction::Cell {
                rect: Rect::new(x, y, width, self.template.block_line_height),
                text: line,
                align: TextAlign::Left,
                font: font.clone(),
                border: false,
                role: CellRole::Label,
            });
        }
        cursor.claim(self.template.title_gap)?;
        Ok(())
    }

    fn title(&self, page: &mut Page, cursor: &mut Cursor) -> Result<(), LayoutError> {
        let y = cursor.claim(self.template.title_height)?;
        page.push(DrawInstruction::Cell {
            rect: Rect::new(
                self.geometry.margins.left,
                y,
                self.geometry.usable_width(),
                self.template.title_height,
            ),
            text: "Tax Invoice".to_string(),
            align: TextAlign::Center,
            font: self.font(self.template.title_font_size).bold(),
            border: false,
            role: CellRole::Title,
        });
        cursor.claim(self.template.section_gap)?;
        Ok(())
    }

    /// Invoice details on the left and the bill-to block on the right, from the same top.
    fn details(
        &self,
        page: &mut Page,
        cursor: &mut Cursor,
        invoice: &InvoiceDocument,
    ) -> Result<(), LayoutError> {
        let t = self.template;
        let top = cursor.y;
        let left = self.geometry.margins.left;
        let bill_to_x = left + self.geometry.usable_width() / 2.0;
        let bold = self.geometry.header_font();
        let regular = self.geometry.body_font();

        let mut y = top;
        for (label, value) in invoice.detail_rows() {
            page.push(DrawInstruction::Cell {
                rect: Rect::new(left, y, t.detail_label_width, t.detail_line_height),
                text: label.to_string(),
                align: TextAlign::Left,
                font: bold.clone(),
                border: true,
                role: CellRole::Label,
            });
            page.push(DrawInstruction::Cell {
                rect: Rect::new(left + t.detail_label_width, y, t.detail_value_width, t.detail_line_height),
                text: value,
                align: TextAlign::Left,
                font: regular.clone(),
                border: true,
                role: CellRole::Value,
            });
            y += t.detail_line_height;
        }
        let details_bottom = y;

        let bill_to_width = self.geometry.margins.left + self.geometry.usable_width() - bill_to_x;
        let mut y = top;
        for (i, line) in invoice.bill_to.block_lines().into_iter().enumerate() {
            page.push(DrawInstruction::Cell {
                rect: Rect::new(bill_to_x, y, bill_to_width, t.detail_line_height),
                text: line,
                align: TextAlign::Left,
                font: if i == 0 { bold.clone() } else { regular.clone() },
                border: false,
                role: if i == 0 { CellRole::Label } else { CellRole::Value },
            });
            y += t.detail_line_height;
        }

        let bottom = details_bottom
            .max(y)
            .max(top + 4.0 * t.detail_line_height + t.section_gap);
        cursor.claim(bottom - top + t.section_gap)?;
        Ok(())
    }

    fn particulars_table(&self, invoice: &InvoiceDocument) -> Result<Table, LayoutError> {
        let grouping = invoice.grouping();
        let columns = vec![
            Column::number("SR.NO"),
            Column::text("Particulars"),
            Column::number("Quantity"),
            Column::number("Rate"),
            Column::number("Amount"),
            Column::number(format!("VAT({})", invoice.currency.code)),
            Column::number("Total"),
        ];
        let rows = invoice
            .items
            .iter()
            .zip(invoice.particulars_lines()?)
            .enumerate()
            .map(|(i, (item, line))| {
                Row::from_strings([
                    (i + 1).to_string(),
                    item.description.clone(),
                    item.quantity.display(grouping),
                    item.rate.format(grouping),
                    line.amount.format(grouping),
                    line.tax.format(grouping),
                    line.total.format(grouping),
                ])
            })
            .collect();
        Ok(Table::with_rows(columns, rows))
    }

    fn particulars(
        &self,
        page: &mut Page,
        cursor: &mut Cursor,
        invoice: &InvoiceDocument,
        totals: &Totals,
    ) -> Result<(), LayoutError> {
        let t = self.template;
        let table = self.particulars_table(invoice)?;
        table.validate()?;
        let plan = TableSolver::new(self.geometry, self.config, self.metrics)
            .resolve_template(&t.column_template)?;
        if plan.len() != table.column_count() {
            return Err(LayoutError::TemplateMismatch {
                expected: table.column_count(),
                found: plan.len(),
            });
        }
        let offsets = plan.column_offsets();

        let header_y = cursor.claim(t.particulars_header_height)?;
        let header_font = self.geometry.header_font();
        for (i, column) in table.columns.iter().enumerate() {
            page.push(DrawInstruction::Cell {
                rect: Rect::new(offsets[i], header_y, plan.widths[i], t.particulars_header_height),
                text: column.name.clone(),
                align: TextAlign::Center,
                font: header_font.clone(),
                border: true,
                role: CellRole::Header(i),
            });
        }

        let resolver = RowHeightResolver::new(
            &plan,
            self.metrics,
            self.geometry.body_font(),
            t.particulars_line_height,
            self.config,
        );
        let body_font = self.geometry.body_font();
        for (index, row) in table.rows.iter().enumerate() {
            let resolved = resolver.resolve(row);
            let height = resolved.height.max(t.particulars_min_row_height);
            let y = cursor.claim(height)?;
            for (i, text) in resolved.texts.into_iter().enumerate() {
                let align = match i {
                    0 => TextAlign::Center,
                    1 => TextAlign::Left,
                    _ => TextAlign::Right,
                };
                page.push(DrawInstruction::Cell {
                    rect: Rect::new(offsets[i], y, plan.widths[i], height),
                    text,
                    align,
                    font: body_font.clone(),
                    border: true,
                    role: CellRole::Body(index),
                });
            }
            page.rows = 0..index + 1;
        }

        self.totals_block(page, cursor, invoice, totals, &plan)
    }

    /// Totals rows under the particulars: the label spans the first four columns and the
    /// figures sit under Amount, VAT and Total.
    fn totals_block(
        &self,
        page: &mut Page,
        cursor: &mut Cursor,
        invoice: &InvoiceDocument,
        totals: &Totals,
        plan: &LayoutPlan,
    ) -> Result<(), LayoutError> {
        let grouping = invoice.grouping();
        let money = |m: fleetprint_finance::Money| m.format(grouping);
        let mut rows: Vec<(String, [Option<String>; 3])> = Vec::new();
        if !totals.discount_percent.is_zero() {
            rows.push(("Subtotal".to_string(), [Some(money(totals.subtotal)), None, None]));
            rows.push((
                format!("Discount ({}%)", totals.discount_percent.display()),
                [Some(format!("-{}", money(totals.discount_amount))), None, None],
            ));
        }
        rows.push((
            "Total".to_string(),
            [
                Some(money(totals.taxable_amount)),
                Some(money(totals.tax_amount)),
                Some(money(totals.grand_total)),
            ],
        ));

        let height = self.template.totals_row_height;
        let offsets = plan.column_offsets();
        let label_width = plan.span_width(0..4);
        for (label, figures) in rows {
            let y = cursor.claim(height)?;
            page.push(DrawInstruction::Cell {
                rect: Rect::new(plan.left, y, label_width, height),
                text: label,
                align: TextAlign::Left,
                font: self.geometry.header_font(),
                border: true,
                role: CellRole::Total,
            });
            for (slot, figure) in figures.into_iter().enumerate() {
                let column = 4 + slot;
                page.push(DrawInstruction::Cell {
                    rect: Rect::new(offsets[column], y, plan.widths[column], height),
                    text: figure.unwrap_or_default(),
                    align: TextAlign::Right,
                    font: self.geometry.body_font(),
                    border: true,
                    role: CellRole::Total,
                });
            }
        }
        Ok(())
    }

    fn words_and_remarks(
        &self,
        page: &mut Page,
        cursor: &mut Cursor,
        invoice: &InvoiceDocument,
        totals: &Totals,
    ) -> Result<(), LayoutError> {
        let t = self.template;
        let left = self.geometry.margins.left;
        let width = self.geometry.usable_width();
        let bold = self.geometry.header_font();
        let regular = self.geometry.body_font();

        cursor.claim(t.words_gap)?;
        let words = amount_in_words(totals.grand_total, &invoice.currency, invoice.numbering)?;
        let text = format!("Amount chargeable (in words): {}", words);
        for line in wrap_words(&text, width, &bold, self.metrics) {
            let y = cursor.claim(t.words_line_height)?;
            page.push(DrawInstruction::Cell {
                rect: Rect::new(left, y, width, t.words_line_height),
                text: line,
                align: TextAlign::Left,
                font: bold.clone(),
                border: false,
                role: CellRole::Total,
            });
        }
        cursor.claim(t.section_gap)?;

        let y = cursor.claim(t.words_line_height)?;
        page.push(DrawInstruction::Cell {
            rect: Rect::new(left, y, width, t.words_line_height),
            text: "Remarks:".to_string(),
            align: TextAlign::Left,
            font: bold,
            border: false,
            role: CellRole::Label,
        });
        let remarks = invoice
            .remarks
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or("No specific remarks.");
        for line in wrap_words(remarks, width, &regular, self.metrics) {
            let y = cursor.claim(t.remarks_line_height)?;
            page.push(DrawInstruction::Cell {
                rect: Rect::new(left, y, width, t.remarks_line_height),
                text: line,
                align: TextAlign::Left,
                font: regular.clone(),
                border: false,
                role: CellRole::Value,
            });
        }
        Ok(())
    }

    fn signature(&self, page: &mut Page, invoice: &InvoiceDocument) {
        let t = self.template;
        let y = self.geometry.page_height - t.signature_from_bottom;
        let left = self.geometry.margins.left;
        let right = left + self.geometry.usable_width();
        let half = self.geometry.usable_width() / 2.0;
        let bold = self.geometry.header_font();

        page.push(DrawInstruction::Cell {
            rect: Rect::new(left, y, half, t.block_line_height),
            text: format!("For {}", invoice.company.name),
            align: TextAlign::Left,
            font: bold.clone(),
            border: false,
            role: CellRole::Label,
        });
        page.push(DrawInstruction::Cell {
            rect: Rect::new(left + half, y, half, t.block_line_height),
            text: "Authorized Signatory".to_string(),
            align: TextAlign::Right,
            font: bold,
            border: false,
            role: CellRole::Label,
        });

        let rule_y = y + t.block_line_height + t.signature_rule_offset;
        page.push(DrawInstruction::Line {
            x1: left,
            y1: rule_y,
            x2: left + t.signature_rule_width,
            y2: rule_y,
        });
        page.push(DrawInstruction::Line {
            x1: right - t.signature_rule_width,
            y1: rule_y,
            x2: right,
            y2: rule_y,
        });
    }

    fn footer(&self, page: &mut Page, invoice: &InvoiceDocument) {
        let Some(note) = invoice.footer_note.as_deref().filter(|n| !n.trim().is_empty()) else {
            return;
        };
        let t = self.template;
        page.push(DrawInstruction::Cell {
            rect: Rect::new(
                self.geometry.margins.left,
                self.geometry.page_height - t.footer_from_bottom,
                self.geometry.usable_width(),
                t.footer_height,
            ),
            text: note.to_string(),
            align: TextAlign::Center,
            font: self.font(t.footer_font_size).italic(),
            border: false,
            role: CellRole::Footer,
        });
    }
}

/// Lays out `invoice` on a single page.
pub fn layout_invoice<M>(
    invoice: &InvoiceDocument,
    geometry: &PageGeometry,
    config: &LayoutConfig,
    template: &InvoiceTemplate,
    metrics: &M,
) -> Result<Page, LayoutError>
where
    M: TextMetrics + ?Sized,
{
    InvoiceCompositor::new(geometry, config, template, metrics).compose(invoice)
}
