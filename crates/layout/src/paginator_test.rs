#![cfg(test)]

use crate::algorithms::table_solver::TableSolver;
use crate::elements::{CellRole, DrawInstruction, Page};
use crate::paginator::Paginator;
use crate::test_utils::{init_logger, monospace, numbered_table, pt_config, pt_geometry, table_from};
use fleetprint_types::Table;

fn paginate(table: &Table, first_top: f32) -> Vec<Page> {
    let geometry = pt_geometry(400.0, 300.0, 20.0);
    let config = pt_config(20.0);
    let metrics = monospace(1.0);
    let plan = TableSolver::new(&geometry, &config, &metrics)
        .resolve_widths(table)
        .unwrap();
    Paginator::new(table, &plan, &geometry, &config, &metrics).paginate(first_top)
}

fn body_bottoms(page: &Page) -> impl Iterator<Item = f32> + '_ {
    page.instructions
        .iter()
        .filter(|i| matches!(i.role(), Some(CellRole::Body(_))))
        .map(DrawInstruction::bottom)
}

#[test]
fn two_hundred_rows_fill_ten_pages() {
    init_logger();
    let table = numbered_table(200, 3);
    let pages = paginate(&table, 20.0);

    assert_eq!(pages.len(), 10);
    for (i, page) in pages.iter().enumerate() {
        assert_eq!(page.index, i + 1);
        assert_eq!(page.rows, i * 20..(i + 1) * 20);
        assert_eq!(page.body_rows().len(), 20);
    }
}

#[test]
fn header_band_is_redrawn_at_the_top_margin() {
    let table = numbered_table(45, 3);
    let pages = paginate(&table, 20.0);

    assert_eq!(pages.len(), 3);
    for page in &pages {
        assert_eq!(page.header_texts(), vec!["Column 0", "Column 1", "Column 2"]);
        for header in page.instructions.iter().filter(|i| matches!(i.role(), Some(CellRole::Header(_)))) {
            let DrawInstruction::Cell { rect, border, .. } = header else {
                panic!("header should be a cell");
            };
            assert_eq!(rect.y, 20.0);
            assert_eq!(rect.height, 20.0);
            assert!(*border);
        }
        let first_body = page.instructions.iter().find(|i| matches!(i.role(), Some(CellRole::Body(_))));
        if let Some(DrawInstruction::Cell { rect, .. }) = first_body {
            assert_eq!(rect.y, 40.0);
        }
    }
}

#[test]
fn rows_keep_order_and_none_are_lost() {
    let table = numbered_table(137, 4);
    let pages = paginate(&table, 20.0);

    let rows: Vec<usize> = pages.iter().flat_map(|p| p.body_rows()).collect();
    assert_eq!(rows, (0..137).collect::<Vec<_>>());

    for page in &pages {
        assert!(body_bottoms(page).all(|b| b <= 280.0 + 0.01));
    }
    let first_cell_texts: Vec<&str> = pages[1]
        .cells_with_role(CellRole::Body(20))
        .filter_map(DrawInstruction::text)
        .collect();
    assert_eq!(first_cell_texts, vec!["r20c0", "r20c1", "r20c2", "r20c3"]);
}

#[test]
fn lower_first_page_start_moves_the_first_break() {
    let table = numbered_table(40, 2);
    let pages = paginate(&table, 60.0);
    // 60 + 20 header leaves 200 for 16 rows on the first page
    assert_eq!(pages[0].rows, 0..16);
    assert_eq!(pages[1].rows, 16..36);
    assert_eq!(pages[2].rows, 36..40);
}

#[test]
fn empty_table_still_yields_a_page_with_headers() {
    let table = table_from(&["Vehicle", "Driver"], &[]);
    let pages = paginate(&table, 20.0);
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].header_texts(), vec!["Vehicle", "Driver"]);
    assert!(pages[0].body_rows().is_empty());
}

#[test]
fn oversized_row_gets_its_own_page() {
    init_logger();
    let huge = "word ".repeat(20_000);
    let table = table_from(&["Notes"], &[&["before"], &[huge.as_str()], &["after"]]);
    let pages = paginate(&table, 20.0);

    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].body_rows(), vec![0]);
    assert_eq!(pages[1].body_rows(), vec![1]);
    assert_eq!(pages[2].body_rows(), vec![2]);
}

#[test]
fn long_headers_are_truncated_to_their_column() {
    let geometry = pt_geometry(100.0, 300.0, 10.0);
    let config = pt_config(20.0);
    let metrics = monospace(4.0);
    let table = table_from(
        &["Registration Number", "Insurance Expiry Date", "Id"],
        &[&["a", "b", "c"]],
    );
    let plan = TableSolver::new(&geometry, &config, &metrics)
        .resolve_widths(&table)
        .unwrap();
    let headers = Paginator::new(&table, &plan, &geometry, &config, &metrics).header_texts();

    assert!(headers[0].ends_with("..."));
    assert!(headers[1].ends_with("..."));
    assert!(headers[0].chars().count() >= 6);

    let untouched = crate::config::LayoutConfig {
        truncate_headers: false,
        ..config
    };
    let headers = Paginator::new(&table, &plan, &geometry, &untouched, &metrics).header_texts();
    assert_eq!(headers[0], "Registration Number");
}
