use fleetprint::{CellRole, DrawInstruction, Page};

/// Texts of every cell with `role`, in emission order.
pub fn texts_with_role(page: &Page, role: CellRole) -> Vec<String> {
    page.cells_with_role(role)
        .filter_map(DrawInstruction::text)
        .map(str::to_string)
        .collect()
}

pub fn footer_text(page: &Page) -> Option<String> {
    texts_with_role(page, CellRole::Footer).into_iter().next()
}

/// Cell texts of source row `row`, left to right.
pub fn row_texts(page: &Page, row: usize) -> Vec<String> {
    texts_with_role(page, CellRole::Body(row))
}

/// Asserts that the pages hold rows `0..expected` once each, in order.
pub fn assert_rows_in_order(pages: &[Page], expected: usize) {
    let rows: Vec<usize> = pages.iter().flat_map(|p| p.body_rows()).collect();
    assert_eq!(rows.len(), expected, "row count across pages");
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(*row, i, "row out of order at position {}", i);
    }
    for page in pages {
        let body = page.body_rows();
        if let (Some(first), Some(last)) = (body.first(), body.last()) {
            assert_eq!(page.rows, *first..*last + 1, "page {} row range", page.index);
        }
    }
}

/// Asserts that no instruction on any page reaches below `limit`.
pub fn assert_within(pages: &[Page], limit: f32, skip_footer: bool) {
    for page in pages {
        for instruction in &page.instructions {
            if skip_footer && instruction.role() == Some(CellRole::Footer) {
                continue;
            }
            assert!(
                instruction.bottom() <= limit + 0.01,
                "page {}: {:?} ends below {}",
                page.index,
                instruction,
                limit
            );
        }
    }
}
