//! Cardinal number spelling for "amount in words" lines.

use crate::FinanceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

const ONES: [&str; 20] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const WESTERN_SCALES: [&str; 7] = [
    "",
    "Thousand",
    "Million",
    "Billion",
    "Trillion",
    "Quadrillion",
    "Quintillion",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;

/// How digits are grouped into named scales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberingSystem {
    /// Thousand, Million, Billion ...
    #[default]
    International,
    /// Thousand, Lakh, Crore.
    Indian,
}

/// Names used when spelling an amount of a given currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub code: String,
    pub major_unit: String,
    pub minor_unit: String,
    /// Minor units per major unit (100 for cents, 1000 for fils).
    pub minor_per_major: u32,
}

impl Currency {
    pub fn new(code: &str, major_unit: &str, minor_unit: &str, minor_per_major: u32) -> Self {
        Self {
            code: code.to_string(),
            major_unit: major_unit.to_string(),
            minor_unit: minor_unit.to_string(),
            minor_per_major,
        }
    }

    pub fn inr() -> Self {
        Self::new("INR", "Rupees", "Paise", 100)
    }

    pub fn bhd() -> Self {
        Self::new("BHD", "Dinars", "Fils", 1000)
    }

    pub fn usd() -> Self {
        Self::new("USD", "Dollars", "Cents", 100)
    }

    /// Looks up a built-in currency by ISO code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "INR" => Some(Self::inr()),
            "BHD" => Some(Self::bhd()),
            "USD" => Some(Self::usd()),
            _ => None,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::bhd()
    }
}

fn below_hundred(n: u64, out: &mut Vec<String>) {
    debug_assert!(n < 100);
    if n < 20 {
        out.push(ONES[n as usize].to_string());
    } else if n % 10 == 0 {
        out.push(TENS[(n / 10) as usize].to_string());
    } else {
        out.push(format!("{}-{}", TENS[(n / 10) as usize], ONES[(n % 10) as usize]));
    }
}

fn below_thousand(n: u64, out: &mut Vec<String>) {
    debug_assert!(n > 0 && n < 1000);
    if n >= 100 {
        out.push(ONES[(n / 100) as usize].to_string());
        out.push("Hundred".to_string());
    }
    let rest = n % 100;
    if rest > 0 {
        below_hundred(rest, out);
    }
}

fn western(n: u64, out: &mut Vec<String>) {
    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push(rest % 1000);
        rest /= 1000;
    }
    for (scale, group) in groups.iter().enumerate().rev() {
        if *group == 0 {
            continue;
        }
        below_thousand(*group, out);
        if !WESTERN_SCALES[scale].is_empty() {
            out.push(WESTERN_SCALES[scale].to_string());
        }
    }
}

fn indian(n: u64, out: &mut Vec<String>) {
    if n >= CRORE {
        indian(n / CRORE, out);
        out.push("Crore".to_string());
    }
    let n = n % CRORE;
    if n >= LAKH {
        below_hundred(n / LAKH, out);
        out.push("Lakh".to_string());
    }
    let n = n % LAKH;
    if n >= 1000 {
        below_hundred(n / 1000, out);
        out.push("Thousand".to_string());
    }
    let n = n % 1000;
    if n > 0 {
        below_thousand(n, out);
    }
}

/// Spells a whole number in Title Case, e.g. `310` -> "Three Hundred Ten".
pub fn integer_to_words(n: u64, system: NumberingSystem) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }
    let mut words = Vec::new();
    match system {
        NumberingSystem::International => western(n, &mut words),
        NumberingSystem::Indian => indian(n, &mut words),
    }
    words.join(" ")
}

/// Spells an amount with its currency units and the closing "Only".
///
/// The minor-unit clause is left out when the fractional part is zero.
pub fn amount_in_words(
    amount: Money,
    currency: &Currency,
    system: NumberingSystem,
) -> Result<String, FinanceError> {
    if amount.is_negative() {
        return Err(FinanceError::InvalidAmount(amount.to_string()));
    }
    let major = integer_to_words(amount.major().unsigned_abs(), system);
    let minor = amount.minor().unsigned_abs() * u64::from(currency.minor_per_major) / 100;
    if minor == 0 {
        Ok(format!("{} {} Only", major, currency.major_unit))
    } else {
        Ok(format!(
            "{} {} and {} {} Only",
            major,
            currency.major_unit,
            integer_to_words(minor, system),
            currency.minor_unit
        ))
    }
}

/// [`amount_in_words`] for a raw float, rejecting non-finite and negative input.
pub fn amount_in_words_f64(
    amount: f64,
    currency: &Currency,
    system: NumberingSystem,
) -> Result<String, FinanceError> {
    let money = Money::from_f64(amount)?;
    amount_in_words(money, currency, system)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_numbers() {
        let w = |n| integer_to_words(n, NumberingSystem::International);
        assert_eq!(w(0), "Zero");
        assert_eq!(w(7), "Seven");
        assert_eq!(w(15), "Fifteen");
        assert_eq!(w(40), "Forty");
        assert_eq!(w(21), "Twenty-One");
        assert_eq!(w(100), "One Hundred");
        assert_eq!(w(310), "Three Hundred Ten");
    }

    #[test]
    fn western_scales() {
        let w = |n| integer_to_words(n, NumberingSystem::International);
        assert_eq!(w(1_000), "One Thousand");
        assert_eq!(w(1_000_001), "One Million One");
        assert_eq!(
            w(1_234_567),
            "One Million Two Hundred Thirty-Four Thousand Five Hundred Sixty-Seven"
        );
        assert!(w(u64::MAX).starts_with("Eighteen Quintillion"));
    }

    #[test]
    fn indian_scales() {
        let w = |n| integer_to_words(n, NumberingSystem::Indian);
        assert_eq!(w(100_000), "One Lakh");
        assert_eq!(w(1_234_567), "Twelve Lakh Thirty-Four Thousand Five Hundred Sixty-Seven");
        assert_eq!(w(10_000_000), "One Crore");
        assert_eq!(w(2_500_000_000), "Two Hundred Fifty Crore");
    }

    #[test]
    fn amount_with_fraction() {
        let words =
            amount_in_words(Money::from_cents(31050), &Currency::usd(), NumberingSystem::Indian)
                .unwrap();
        assert!(words.starts_with("Three Hundred Ten"));
        assert_eq!(words, "Three Hundred Ten Dollars and Fifty Cents Only");

        let fils =
            amount_in_words(Money::from_cents(31050), &Currency::bhd(), NumberingSystem::Indian)
                .unwrap();
        assert_eq!(fils, "Three Hundred Ten Dinars and Five Hundred Fils Only");
    }

    #[test]
    fn zero_fraction_has_no_minor_clause() {
        let words = amount_in_words(Money::from_major(310), &Currency::inr(), NumberingSystem::Indian)
            .unwrap();
        assert_eq!(words, "Three Hundred Ten Rupees Only");
        assert!(!words.contains("Paise"));
    }

    #[test]
    fn invalid_amounts() {
        let usd = Currency::usd();
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            let err = amount_in_words_f64(bad, &usd, NumberingSystem::International).unwrap_err();
            assert!(matches!(err, FinanceError::InvalidAmount(_)));
        }
        assert!(
            amount_in_words(Money::from_cents(-1), &usd, NumberingSystem::International).is_err()
        );
    }

    #[test]
    fn currency_lookup() {
        assert_eq!(Currency::from_code("bhd"), Some(Currency::bhd()));
        assert_eq!(Currency::from_code("EUR"), None);
    }
}
