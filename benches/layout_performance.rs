//! Layout engine micro-benchmarks
//!
//! Measures width allocation, pagination and invoice composition for growing inputs.

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fleetprint::finance::{Currency, Money, NumberingSystem, Percent, Quantity};
use fleetprint::layout::invoice::{BillTo, CompanyInfo, LineItem};
use fleetprint::layout::{LayoutConfig, TableSolver};
use fleetprint::{
    Column, InvoiceDocument, PageGeometry, ReportEngine, ReportHeader, ReportJob, Row,
    StandardFontMetrics, Table, WrapStrategy,
};
use std::hint::black_box;

fn fleet_table(rows: usize, columns: usize) -> Table {
    let cols = (0..columns).map(|c| Column::text(format!("Field {}", c))).collect();
    let mut table = Table::new(cols);
    for r in 0..rows {
        table.push_row(Row::from_strings(
            (0..columns).map(|c| format!("Vehicle {} service note {}", r, c)),
        ));
    }
    table
}

fn invoice(items: usize) -> InvoiceDocument {
    InvoiceDocument {
        company: CompanyInfo {
            name: "East Concord W.L.L".into(),
            address_lines: vec!["Manama".into()],
            trn: None,
            email: None,
            phone: None,
        },
        bill_to: BillTo {
            name: "Gulf Freight Co.".into(),
            address_lines: Vec::new(),
            trn: None,
        },
        invoice_number: "INV-1".into(),
        date: NaiveDate::default(),
        delivery_note: None,
        buyer_order_number: None,
        items: (0..items)
            .map(|i| LineItem::new(format!("Haulage leg {}", i), Quantity::whole(2), Money::from_major(125)))
            .collect(),
        discount_percent: Percent::whole(5),
        tax_rate: Percent::whole(10),
        currency: Currency::bhd(),
        numbering: NumberingSystem::International,
        remarks: None,
        footer_note: None,
    }
}

fn benchmark_width_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("width_allocation");
    let geometry = PageGeometry::a4();
    let config = LayoutConfig::default();
    let metrics = StandardFontMetrics::new(geometry.unit);

    for columns in [3, 12, 40] {
        let table = fleet_table(200, columns);
        group.bench_with_input(BenchmarkId::new("columns", columns), &table, |b, table| {
            let solver = TableSolver::new(&geometry, &config, &metrics);
            b.iter(|| solver.resolve_widths(black_box(table)))
        });
    }

    group.finish();
}

fn benchmark_pagination(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagination");
    let header = ReportHeader::new("Fleet Register");

    for rows in [100, 1_000, 10_000] {
        let table = fleet_table(rows, 6);
        group.throughput(Throughput::Elements(rows as u64));
        for (name, wrap) in [("estimate", WrapStrategy::Estimate), ("word_wrap", WrapStrategy::WordWrap)] {
            let engine = ReportEngine::default().with_wrap(wrap);
            group.bench_with_input(BenchmarkId::new(name, rows), &table, |b, table| {
                b.iter(|| engine.report(black_box(table.clone()), &header))
            });
        }
    }

    group.finish();
}

fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_batch");
    let engine = ReportEngine::default();

    for reports in [4, 16] {
        group.throughput(Throughput::Elements(reports as u64));
        group.bench_with_input(BenchmarkId::new("reports", reports), &reports, |b, &reports| {
            b.iter(|| {
                let jobs = (0..reports)
                    .map(|i| ReportJob {
                        table: fleet_table(500, 5),
                        header: ReportHeader::new(format!("Depot {}", i)),
                    })
                    .collect();
                engine.report_batch(jobs)
            })
        });
    }

    group.finish();
}

fn benchmark_invoice(c: &mut Criterion) {
    let mut group = c.benchmark_group("invoice");
    let engine = ReportEngine::default();

    for items in [1, 4] {
        let document = invoice(items);
        group.bench_with_input(BenchmarkId::new("items", items), &document, |b, document| {
            b.iter(|| engine.invoice(black_box(document)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_width_allocation,
    benchmark_pagination,
    benchmark_batch,
    benchmark_invoice
);
criterion_main!(benches);
