//! Fixed-point value types: [`Money`] (cents), [`Quantity`] (thousandths) and
//! [`Percent`] (hundredths of a percent).

use crate::FinanceError;
use crate::decimal::{div_half_up, parse_scaled};
use fleetprint_types::format::{DigitGrouping, group_digits};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw JSON form accepted for any fixed-point field: a number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumericRepr {
    Num(f64),
    Str(String),
}

fn parse_repr(repr: NumericRepr, scale: u32) -> Result<i64, String> {
    match repr {
        NumericRepr::Num(v) => scaled_from_f64(v, scale).ok_or_else(|| v.to_string()),
        NumericRepr::Str(s) => parse_scaled(&s, scale).ok_or(s),
    }
}

/// Converts through the shortest decimal representation of `v`, so `2.675` rounds
/// as the decimal 2.675 rather than its binary neighbour.
fn scaled_from_f64(v: f64, scale: u32) -> Option<i64> {
    if !v.is_finite() || v < 0.0 {
        return None;
    }
    parse_scaled(&v.to_string(), scale)
}

/// A non-negative or signed amount of money held as whole cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "NumericReprMoney", into = "f64")]
pub struct Money {
    cents: i64,
}

#[derive(Deserialize)]
#[serde(transparent)]
struct NumericReprMoney(NumericRepr);

impl TryFrom<NumericReprMoney> for Money {
    type Error = FinanceError;

    fn try_from(repr: NumericReprMoney) -> Result<Self, Self::Error> {
        parse_repr(repr.0, 2)
            .map(Money::from_cents)
            .map_err(FinanceError::InvalidAmount)
    }
}

impl From<Money> for f64 {
    fn from(m: Money) -> f64 {
        m.cents as f64 / 100.0
    }
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Whole units, saturating at the representable range.
    pub fn from_major(major: i64) -> Self {
        Self {
            cents: major.saturating_mul(100),
        }
    }

    /// Rounds a float to cents, half-up. Negative, NaN or infinite input is rejected.
    pub fn from_f64(value: f64) -> Result<Self, FinanceError> {
        scaled_from_f64(value, 2)
            .map(Self::from_cents)
            .ok_or_else(|| FinanceError::InvalidAmount(value.to_string()))
    }

    /// Parses a decimal string such as `"1,234.50"`.
    pub fn parse(input: &str) -> Result<Self, FinanceError> {
        parse_scaled(input, 2)
            .map(Self::from_cents)
            .ok_or_else(|| FinanceError::InvalidAmount(input.to_string()))
    }

    pub fn cents(self) -> i64 {
        self.cents
    }

    /// The whole-unit part (rupees, dinars, dollars).
    pub fn major(self) -> i64 {
        self.cents / 100
    }

    /// The fractional part in cents, always non-negative.
    pub fn minor(self) -> i64 {
        (self.cents % 100).abs()
    }

    pub fn is_negative(self) -> bool {
        self.cents < 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::from_cents)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.cents.checked_sub(other.cents).map(Money::from_cents)
    }

    /// Adds every amount, failing with [`FinanceError::Overflow`] labelled `what`.
    pub fn checked_sum<I>(amounts: I, what: &'static str) -> Result<Money, FinanceError>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, Money::checked_add)
            .ok_or(FinanceError::Overflow(what))
    }

    /// `round2(self * quantity)`.
    pub fn times(self, quantity: Quantity) -> Result<Money, FinanceError> {
        let product = self.cents as i128 * quantity.thousandths() as i128;
        Self::narrow(div_half_up(product, Quantity::SCALE as i128), "line amount")
    }

    /// `round2(self * percent / 100)`.
    pub fn percent_of(self, percent: Percent) -> Result<Money, FinanceError> {
        let product = self.cents as i128 * percent.hundredths() as i128;
        Self::narrow(div_half_up(product, 100 * Percent::SCALE as i128), "percentage")
    }

    fn narrow(value: i128, what: &'static str) -> Result<Money, FinanceError> {
        i64::try_from(value)
            .map(Money::from_cents)
            .map_err(|_| FinanceError::Overflow(what))
    }

    /// Formats with grouped integer digits and exactly two decimals.
    pub fn format(self, grouping: DigitGrouping) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let major = group_digits(&self.major().unsigned_abs().to_string(), grouping);
        format!("{}{}.{:02}", sign, major, self.minor())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DigitGrouping::Western))
    }
}

/// A non-negative quantity with three decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "NumericReprQuantity", into = "f64")]
pub struct Quantity {
    thousandths: i64,
}

#[derive(Deserialize)]
#[serde(transparent)]
struct NumericReprQuantity(NumericRepr);

impl TryFrom<NumericReprQuantity> for Quantity {
    type Error = FinanceError;

    fn try_from(repr: NumericReprQuantity) -> Result<Self, Self::Error> {
        parse_repr(repr.0, 3)
            .map(|thousandths| Quantity { thousandths })
            .map_err(FinanceError::InvalidAmount)
    }
}

impl From<Quantity> for f64 {
    fn from(q: Quantity) -> f64 {
        q.thousandths as f64 / Quantity::SCALE as f64
    }
}

impl Quantity {
    const SCALE: i64 = 1000;

    pub fn whole(units: u32) -> Self {
        Self {
            thousandths: units as i64 * Self::SCALE,
        }
    }

    pub fn from_f64(value: f64) -> Result<Self, FinanceError> {
        scaled_from_f64(value, 3)
            .map(|thousandths| Self { thousandths })
            .ok_or_else(|| FinanceError::InvalidAmount(value.to_string()))
    }

    pub fn thousandths(self) -> i64 {
        self.thousandths
    }

    /// Display form: whole quantities print without decimals, others with up to three.
    pub fn display(self, grouping: DigitGrouping) -> String {
        let whole = group_digits(&(self.thousandths / Self::SCALE).to_string(), grouping);
        let frac = self.thousandths % Self::SCALE;
        if frac == 0 {
            whole
        } else {
            let digits = format!("{:03}", frac);
            format!("{}.{}", whole, digits.trim_end_matches('0'))
        }
    }
}

/// A percentage with two decimals, e.g. `12.5` for 12.5 %.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "NumericReprPercent", into = "f64")]
pub struct Percent {
    hundredths: i64,
}

#[derive(Deserialize)]
#[serde(transparent)]
struct NumericReprPercent(NumericRepr);

impl TryFrom<NumericReprPercent> for Percent {
    type Error = FinanceError;

    fn try_from(repr: NumericReprPercent) -> Result<Self, Self::Error> {
        parse_repr(repr.0, 2)
            .map(|hundredths| Percent { hundredths })
            .map_err(FinanceError::InvalidPercent)
    }
}

impl From<Percent> for f64 {
    fn from(p: Percent) -> f64 {
        p.hundredths as f64 / Percent::SCALE as f64
    }
}

impl Percent {
    const SCALE: i64 = 100;

    pub const ZERO: Percent = Percent { hundredths: 0 };

    pub fn whole(value: u32) -> Self {
        Self {
            hundredths: value as i64 * Self::SCALE,
        }
    }

    pub fn from_f64(value: f64) -> Result<Self, FinanceError> {
        scaled_from_f64(value, 2)
            .map(|hundredths| Self { hundredths })
            .ok_or_else(|| FinanceError::InvalidPercent(value.to_string()))
    }

    pub fn hundredths(self) -> i64 {
        self.hundredths
    }

    pub fn is_zero(self) -> bool {
        self.hundredths == 0
    }

    /// `"15"`, `"12.5"`.
    pub fn display(self) -> String {
        let whole = self.hundredths / Self::SCALE;
        let frac = self.hundredths % Self::SCALE;
        if frac == 0 {
            whole.to_string()
        } else {
            format!("{}.{}", whole, format!("{:02}", frac).trim_end_matches('0'))
        }
    }
}
