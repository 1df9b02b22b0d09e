//! Digit grouping shared by cell stringification and money formatting.

use serde::{Deserialize, Serialize};

/// How the integer digits of a number are split by separators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// Groups of three: `1,234,567`.
    #[default]
    Western,
    /// Last three, then groups of two (lakh/crore): `12,34,567`.
    Indian,
}

/// Inserts `,` separators into a run of ASCII digits.
///
/// The input must not carry a sign or a fractional part.
pub fn group_digits(digits: &str, grouping: DigitGrouping) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let lead_size = match grouping {
        DigitGrouping::Western => 3,
        DigitGrouping::Indian => 2,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(lead_size);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}

/// Formats `value` with `decimals` fixed decimals and grouped integer digits.
///
/// Non-finite values have no meaningful display and render as an empty string.
pub fn format_decimal(value: f64, decimals: usize, grouping: DigitGrouping) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut out = String::with_capacity(raw.len() + raw.len() / 3 + 1);
    // "-0.00" reads badly on a report; only keep the sign for non-zero output.
    if value.is_sign_negative() && raw.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, grouping));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
