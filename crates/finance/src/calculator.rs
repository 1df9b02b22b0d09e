//! Invoice totals.

use crate::money::{Money, Percent, Quantity};
use crate::FinanceError;
use serde::Serialize;

/// Every derived money field of an invoice, in computation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub line_amounts: Vec<Money>,
    pub subtotal: Money,
    pub discount_percent: Percent,
    pub discount_amount: Money,
    pub taxable_amount: Money,
    pub tax_rate: Percent,
    pub tax_amount: Money,
    pub grand_total: Money,
}

/// `round2(quantity * rate)`.
pub fn line_amount(quantity: Quantity, rate: Money) -> Result<Money, FinanceError> {
    if rate.is_negative() {
        return Err(FinanceError::InvalidAmount(rate.to_string()));
    }
    rate.times(quantity)
}

/// Tax on a single line before any invoice-level discount.
pub fn line_tax(amount: Money, tax_rate: Percent) -> Result<Money, FinanceError> {
    amount.percent_of(tax_rate)
}

/// Totals for quantity/rate line items.
pub fn compute_totals<I>(
    lines: I,
    discount_percent: Percent,
    tax_rate: Percent,
) -> Result<Totals, FinanceError>
where
    I: IntoIterator<Item = (Quantity, Money)>,
{
    let amounts = lines
        .into_iter()
        .map(|(qty, rate)| line_amount(qty, rate))
        .collect::<Result<Vec<_>, _>>()?;
    compute_totals_from_amounts(amounts, discount_percent, tax_rate)
}

/// Totals for lines that already carry an amount.
///
/// The order of operations is fixed: subtotal, discount, taxable amount, tax, total.
/// Each percentage step rounds half-up to cents before the next one runs.
pub fn compute_totals_from_amounts<I>(
    amounts: I,
    discount_percent: Percent,
    tax_rate: Percent,
) -> Result<Totals, FinanceError>
where
    I: IntoIterator<Item = Money>,
{
    if discount_percent > Percent::whole(100) {
        return Err(FinanceError::InvalidPercent(discount_percent.display()));
    }

    let line_amounts: Vec<Money> = amounts.into_iter().collect();
    if let Some(bad) = line_amounts.iter().find(|m| m.is_negative()) {
        return Err(FinanceError::InvalidAmount(bad.to_string()));
    }

    let subtotal = Money::checked_sum(line_amounts.iter().copied(), "subtotal")?;
    let discount_amount = subtotal.percent_of(discount_percent)?;
    let taxable_amount = subtotal
        .checked_sub(discount_amount)
        .ok_or(FinanceError::Overflow("taxable amount"))?;
    let tax_amount = taxable_amount.percent_of(tax_rate)?;
    let grand_total = taxable_amount
        .checked_add(tax_amount)
        .ok_or(FinanceError::Overflow("grand total"))?;

    log::debug!(
        "Invoice totals: subtotal={} discount={} taxable={} tax={} total={}",
        subtotal,
        discount_amount,
        taxable_amount,
        tax_amount,
        grand_total
    );

    Ok(Totals {
        line_amounts,
        subtotal,
        discount_percent,
        discount_amount,
        taxable_amount,
        tax_rate,
        tax_amount,
        grand_total,
    })
}
