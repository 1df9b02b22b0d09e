#![cfg(test)]

use crate::document::ReportHeader;
use crate::elements::{CellRole, DrawInstruction, Page};
use crate::summary::{SummaryDocument, SummarySection, SummaryTemplate, layout_summary};
use crate::test_utils::{init_logger, monospace, pt_config, pt_geometry};
use crate::LayoutError;
use chrono::NaiveDate;
use fleetprint_style::{Margins, PageGeometry};

/// 20 pt headings, 10 pt lines and no gap between sections.
fn tight_template(section_gap: f32) -> SummaryTemplate {
    SummaryTemplate {
        heading_height: 20.0,
        line_height: 10.0,
        section_gap,
        ..SummaryTemplate::default()
    }
}

fn section(name: &str, lines: usize) -> SummarySection {
    (0..lines).fold(SummarySection::new(name), |s, i| s.entry(&format!("Metric {}", i), i))
}

fn layout(document: &SummaryDocument, template: &SummaryTemplate) -> Vec<Page> {
    // 400 x 300 pt with 20 pt margins: content runs from y 20 to y 280.
    let geometry = pt_geometry(400.0, 300.0, 20.0);
    layout_summary(document, &geometry, &pt_config(20.0), template, &monospace(1.0)).unwrap()
}

fn top_of(page: &Page, role: CellRole) -> Option<f32> {
    page.cells_with_role(role).next().map(|i| match i {
        DrawInstruction::Cell { rect, .. } => rect.y,
        _ => f32::NAN,
    })
}

#[test]
fn whole_sections_flow_onto_the_next_page() {
    init_logger();
    let document = SummaryDocument::new(ReportHeader::default())
        .section(section("Overall KPIs", 10))
        .section(section("Revenue by Company", 10))
        .section(section("Trips by Company", 10));

    let pages = layout(&document, &tight_template(0.0));

    assert_eq!(pages.len(), 2);
    assert_eq!(top_of(&pages[0], CellRole::SectionHeading(0)), Some(20.0));
    assert_eq!(top_of(&pages[0], CellRole::SectionHeading(1)), Some(140.0));
    assert_eq!(top_of(&pages[0], CellRole::SectionHeading(2)), None);
    assert_eq!(top_of(&pages[1], CellRole::SectionHeading(2)), Some(20.0));
    assert_eq!(pages[1].cells_with_role(CellRole::SectionLine(2)).count(), 10);
}

#[test]
fn long_section_splits_between_lines() {
    init_logger();
    let document = SummaryDocument::new(ReportHeader::default()).section(section("Details Per Company", 40));

    let pages = layout(&document, &tight_template(0.0));

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].cells_with_role(CellRole::SectionLine(0)).count(), 24);
    assert_eq!(pages[1].cells_with_role(CellRole::SectionLine(0)).count(), 16);
    assert_eq!(pages[1].cells_with_role(CellRole::SectionHeading(0)).count(), 0);
    assert_eq!(top_of(&pages[1], CellRole::SectionLine(0)), Some(20.0));

    let texts: Vec<&str> = pages
        .iter()
        .flat_map(|p| p.cells_with_role(CellRole::SectionLine(0)))
        .filter_map(DrawInstruction::text)
        .collect();
    assert_eq!(texts.first().copied(), Some("- Metric 0: 0"));
    assert_eq!(texts.last().copied(), Some("- Metric 39: 39"));
}

#[test]
fn heading_moves_with_its_first_line() {
    init_logger();
    // The first section ends at y 250; with the gap the next heading would start at 255,
    // fit by itself, and leave its first line to the next page.
    let document = SummaryDocument::new(ReportHeader::default())
        .section(section("Vehicles", 21))
        .section(section("Employees", 2));

    let pages = layout(&document, &tight_template(5.0));

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].cells_with_role(CellRole::SectionHeading(1)).count(), 0);
    assert_eq!(top_of(&pages[1], CellRole::SectionHeading(1)), Some(20.0));
    assert_eq!(top_of(&pages[1], CellRole::SectionLine(1)), Some(40.0));
}

#[test]
fn footer_carries_suffix_and_page_count() {
    init_logger();
    let header = ReportHeader::new("Global Logistic Management Dashboard Report")
        .dated(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
        .with_footer_suffix("Global Management Report");
    let document = SummaryDocument::new(header).section(section("Details Per Company", 60));

    let pages = layout(&document, &tight_template(0.0));
    let total = pages.len();
    assert!(total > 1);
    for page in &pages {
        let footer = page.cells_with_role(CellRole::Footer).next().and_then(DrawInstruction::text);
        assert_eq!(
            footer,
            Some(format!("Page {}/{} - Global Management Report", page.index, total).as_str())
        );
    }

    assert_eq!(pages[0].cells_with_role(CellRole::Title).count(), 1);
    let date = pages[0].cells_with_role(CellRole::ReportDate).next().and_then(DrawInstruction::text);
    assert_eq!(date, Some("Report Date: 2024-06-30"));
    assert!(pages[1..].iter().all(|p| p.cells_with_role(CellRole::Title).count() == 0));
}

#[test]
fn placeholder_stands_in_for_empty_sections() {
    init_logger();
    let document = SummaryDocument::new(ReportHeader::default())
        .section(SummarySection::new("Trips by Company").with_placeholder("No trip data available."))
        .section(SummarySection::new("Leave Requests"));

    let pages = layout(&document, &tight_template(5.0));
    let lines: Vec<&str> = pages[0]
        .cells_with_role(CellRole::SectionLine(0))
        .filter_map(DrawInstruction::text)
        .collect();
    assert_eq!(lines, vec!["No trip data available."]);
    assert_eq!(pages[0].cells_with_role(CellRole::SectionLine(1)).count(), 0);
    assert_eq!(pages[0].cells_with_role(CellRole::SectionHeading(1)).count(), 1);
}

#[test]
fn summary_deserializes_with_flattened_header() {
    let json = r#"{
        "title": "Management Report",
        "generatedOn": "2024-06-30",
        "footerSuffix": "Global Management Report",
        "sections": [
            { "heading": "Overall KPIs", "lines": ["- Total Vehicles: 42"] },
            { "heading": "Trips by Company", "placeholder": "No trip data available." }
        ]
    }"#;
    let document: SummaryDocument = serde_json::from_str(json).unwrap();
    assert_eq!(document.header.footer_suffix.as_deref(), Some("Global Management Report"));
    assert_eq!(document.sections.len(), 2);
    assert!(document.sections[1].lines.is_empty());
}

#[test]
fn degenerate_geometry_is_rejected() {
    let geometry = PageGeometry::a4().with_margins(Margins::new(150.0, 10.0, 150.0, 10.0));
    let result = layout_summary(
        &SummaryDocument::default(),
        &geometry,
        &pt_config(10.0),
        &SummaryTemplate::default(),
        &monospace(1.0),
    );
    assert!(matches!(result, Err(LayoutError::DegenerateGeometry(_))));
}
