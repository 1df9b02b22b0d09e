use chrono::NaiveDate;
use fleetprint::finance::{Currency, Money, NumberingSystem, Percent, Quantity};
use fleetprint::layout::invoice::{BillTo, CompanyInfo, LineItem};
use fleetprint::{CellValue, Column, InvoiceDocument, Row, Table};
use serde_json::{Value, json};

/// A fleet register: plate, model, mileage and service date per vehicle.
pub fn vehicle_table(rows: usize) -> Table {
    let columns = vec![
        Column::text("Plate"),
        Column::text("Model"),
        Column::number("Mileage"),
        Column::new("Last Service", fleetprint::ColumnType::Date),
    ];
    let mut table = Table::new(columns);
    for i in 0..rows {
        table.push_row(Row::from_values(vec![
            CellValue::Text(format!("B {:04}", i)),
            CellValue::Text("Hino 300".into()),
            CellValue::Integer(10_000 + i as i64 * 37),
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 1 + (i % 12) as u32, 1).unwrap_or_default()),
        ]));
    }
    table
}

pub fn table_request_json() -> Value {
    json!({
        "title": "Vehicles",
        "columns": [
            { "name": "Plate" },
            { "name": "Mileage", "type": "number" },
            { "name": "Driver" }
        ],
        "rows": [
            ["B 1234", 120500, "Ali"],
            { "Plate": "C 77", "Mileage": 98000 },
            ["D 9", null, "Sara"]
        ]
    })
}

pub fn sample_invoice(items: usize) -> InvoiceDocument {
    InvoiceDocument {
        company: CompanyInfo {
            name: "East Concord W.L.L".into(),
            address_lines: vec!["Flat 11, Building 471".into(), "Manama".into()],
            trn: Some("200012345600002".into()),
            email: None,
            phone: Some("17228646".into()),
        },
        bill_to: BillTo {
            name: "Gulf Freight Co.".into(),
            address_lines: vec!["Road 3513, Block 335".into()],
            trn: None,
        },
        invoice_number: "INV-0042".into(),
        date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default(),
        delivery_note: None,
        buyer_order_number: None,
        items: (0..items)
            .map(|_| LineItem::new("Logistic Services", Quantity::whole(3), Money::from_major(100)))
            .collect(),
        discount_percent: Percent::whole(10),
        tax_rate: Percent::whole(15),
        currency: Currency::bhd(),
        numbering: NumberingSystem::International,
        remarks: None,
        footer_note: None,
    }
}

pub fn invoice_json() -> Value {
    json!({
        "company": { "name": "Acme Haulage", "addressLines": ["12 Dock Road"] },
        "billTo": { "name": "Client Ltd" },
        "invoiceNumber": "A-7",
        "date": "2024-02-29",
        "items": [
            { "description": "Container transport", "quantity": 2, "rate": "1,250.00" },
            { "description": "Storage", "quantity": 1.5, "rate": 80 }
        ],
        "taxRate": 5,
        "currency": { "code": "INR", "majorUnit": "Rupees", "minorUnit": "Paise", "minorPerMajor": 100 },
        "numbering": "indian"
    })
}
