use chrono::NaiveDate;
use fleetprint_finance::{
    Currency, FinanceError, Money, NumberingSystem, Percent, Quantity, Totals, compute_totals,
    line_amount, line_tax,
};
use fleetprint_types::DigitGrouping;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    #[serde(default)]
    pub address_lines: Vec<String>,
    /// Tax registration number.
    #[serde(default)]
    pub trn: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl CompanyInfo {
    /// Lines of the company block, top to bottom.
    pub fn block_lines(&self) -> Vec<String> {
        let mut lines = vec![self.name.clone()];
        lines.extend(self.address_lines.iter().cloned());
        if let Some(trn) = &self.trn {
            lines.push(format!("TRN: {}", trn));
        }
        if let Some(email) = &self.email {
            lines.push(format!("Email: {}", email));
        }
        if let Some(phone) = &self.phone {
            lines.push(format!("Phone: {}", phone));
        }
        lines
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillTo {
    pub name: String,
    #[serde(default)]
    pub address_lines: Vec<String>,
    #[serde(default)]
    pub trn: Option<String>,
}

impl BillTo {
    pub fn block_lines(&self) -> Vec<String> {
        let mut lines = vec!["Bill To:".to_string(), self.name.clone()];
        lines.extend(self.address_lines.iter().cloned());
        if let Some(trn) = &self.trn {
            lines.push(format!("TRN: {}", trn));
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: Quantity,
    pub rate: Money,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: Quantity, rate: Money) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
        }
    }
}

/// A single-page tax invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub company: CompanyInfo,
    pub bill_to: BillTo,
    pub invoice_number: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub delivery_note: Option<String>,
    #[serde(default)]
    pub buyer_order_number: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub discount_percent: Percent,
    #[serde(default)]
    pub tax_rate: Percent,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub numbering: NumberingSystem,
    #[serde(default)]
    pub remarks: Option<String>,
    /// Boilerplate printed at the very bottom of the page.
    #[serde(default)]
    pub footer_note: Option<String>,
}

/// Display values of one particulars row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticularsLine {
    pub amount: Money,
    pub tax: Money,
    pub total: Money,
}

impl InvoiceDocument {
    pub fn totals(&self) -> Result<Totals, FinanceError> {
        compute_totals(
            self.items.iter().map(|i| (i.quantity, i.rate)),
            self.discount_percent,
            self.tax_rate,
        )
    }

    /// Per-line amount, tax and total, before the invoice-level discount.
    pub fn particulars_lines(&self) -> Result<Vec<ParticularsLine>, FinanceError> {
        self.items
            .iter()
            .map(|item| {
                let amount = line_amount(item.quantity, item.rate)?;
                let tax = line_tax(amount, self.tax_rate)?;
                let total = amount
                    .checked_add(tax)
                    .ok_or(FinanceError::Overflow("line total"))?;
                Ok(ParticularsLine { amount, tax, total })
            })
            .collect()
    }

    pub fn grouping(&self) -> DigitGrouping {
        match self.numbering {
            NumberingSystem::International => DigitGrouping::Western,
            NumberingSystem::Indian => DigitGrouping::Indian,
        }
    }

    /// Detail rows shown as bordered label/value cells.
    pub fn detail_rows(&self) -> Vec<(&'static str, String)> {
        let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
        vec![
            ("Invoice No.", self.invoice_number.clone()),
            ("Date", self.date.format("%Y-%m-%d").to_string()),
            ("Delivery Note", or_na(&self.delivery_note)),
            ("Buyer's Order No.", or_na(&self.buyer_order_number)),
        ]
    }
}
