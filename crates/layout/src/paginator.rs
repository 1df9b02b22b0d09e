//! Splits table rows across pages, redrawing the header band on each one.

use crate::algorithms::pagination::check_row_fit;
use crate::algorithms::row_height::{ResolvedRow, RowHeightResolver};
use crate::algorithms::table_solver::LayoutPlan;
use crate::config::LayoutConfig;
use crate::elements::{CellRole, DrawInstruction, Page};
use crate::metrics::TextMetrics;
use crate::text::truncate_with_ellipsis;
use fleetprint_style::{PageGeometry, TextAlign};
use fleetprint_types::{Rect, Table};

enum PageState {
    /// No page is open; the next row opens one with its header band at `top`.
    NewPage { top: f32 },
    InPage { page: Page, cursor_y: f32 },
}

pub struct Paginator<'a, M: ?Sized> {
    table: &'a Table,
    plan: &'a LayoutPlan,
    geometry: &'a PageGeometry,
    config: &'a LayoutConfig,
    metrics: &'a M,
}

impl<'a, M> Paginator<'a, M>
where
    M: TextMetrics + ?Sized,
{
    pub fn new(
        table: &'a Table,
        plan: &'a LayoutPlan,
        geometry: &'a PageGeometry,
        config: &'a LayoutConfig,
        metrics: &'a M,
    ) -> Self {
        Self {
            table,
            plan,
            geometry,
            config,
            metrics,
        }
    }

    /// Header texts, truncated to their columns when configured.
    pub fn header_texts(&self) -> Vec<String> {
        let font = self.geometry.header_font();
        self.table
            .columns
            .iter()
            .zip(&self.plan.widths)
            .map(|(column, width)| {
                if self.config.truncate_headers {
                    let room = width - 2.0 * self.config.header_text_padding;
                    truncate_with_ellipsis(&column.name, room, &font, self.metrics)
                } else {
                    column.name.clone()
                }
            })
            .collect()
    }

    /// Lays out every row. The header band of the first page starts at `first_top`, later
    /// pages start at the top margin. A table without rows still yields one page.
    pub fn paginate(&self, first_top: f32) -> Vec<Page> {
        let headers = self.header_texts();
        let resolver = RowHeightResolver::for_body(self.plan, self.metrics, self.geometry, self.config);
        let limit = self.geometry.content_bottom();
        let fresh_top = self.geometry.margins.top + self.config.header_band_height;

        let mut pages = Vec::new();
        let mut state = PageState::NewPage { top: first_top };

        for (index, row) in self.table.rows.iter().enumerate() {
            let resolved = resolver.resolve(row);

            state = match state {
                PageState::InPage { page, cursor_y }
                    if check_row_fit(cursor_y, resolved.height, limit).should_break =>
                {
                    pages.push(page);
                    PageState::NewPage {
                        top: self.geometry.margins.top,
                    }
                }
                other => other,
            };

            let (mut page, cursor_y) = match state {
                PageState::NewPage { top } => {
                    let page = self.open_page(pages.len() + 1, top, &headers);
                    (page, top + self.config.header_band_height)
                }
                PageState::InPage { page, cursor_y } => (page, cursor_y),
            };

            if check_row_fit(cursor_y, resolved.height, limit).should_break {
                log::warn!(
                    "Row {} is {:.2} tall but only {:.2} is available below the header ({:.2} on a fresh page); it will overflow the bottom margin.",
                    index,
                    resolved.height,
                    limit - cursor_y,
                    limit - fresh_top,
                );
            }

            self.draw_row(&mut page, index, cursor_y, &resolved);
            state = PageState::InPage {
                page,
                cursor_y: cursor_y + resolved.height + self.config.row_gap,
            };
        }

        match state {
            PageState::InPage { page, .. } => pages.push(page),
            PageState::NewPage { top } if pages.is_empty() => {
                pages.push(self.open_page(1, top, &headers));
            }
            PageState::NewPage { .. } => {}
        }

        log::debug!(
            "Paginated {} rows onto {} pages.",
            self.table.rows.len(),
            pages.len()
        );
        pages
    }

    fn open_page(&self, index: usize, top: f32, headers: &[String]) -> Page {
        let mut page = Page::new(index);
        let font = self.geometry.header_font();
        for (column, (x, (width, text))) in self
            .plan
            .column_offsets()
            .into_iter()
            .zip(self.plan.widths.iter().zip(headers))
            .enumerate()
        {
            page.push(DrawInstruction::Cell {
                rect: Rect::new(x, top, *width, self.config.header_band_height),
                text: text.clone(),
                align: TextAlign::Center,
                font: font.clone(),
                border: true,
                role: CellRole::Header(column),
            });
        }
        page
    }

    fn draw_row(&self, page: &mut Page, index: usize, y: f32, row: &ResolvedRow) {
        let font = self.geometry.body_font();
        for (((x, width), text), column) in self
            .plan
            .column_offsets()
            .into_iter()
            .zip(&self.plan.widths)
            .zip(&row.texts)
            .zip(&self.table.columns)
        {
            let align = if column.declared_type.is_numeric() {
                TextAlign::Right
            } else {
                TextAlign::Left
            };
            page.push(DrawInstruction::Cell {
                rect: Rect::new(x, y, *width, row.height),
                text: text.clone(),
                align,
                font: font.clone(),
                border: true,
                role: CellRole::Body(index),
            });
        }
        if page.rows.is_empty() {
            page.rows = index..index + 1;
        } else {
            page.rows.end = index + 1;
        }
    }
}
