//! Typed cell values and their report display form.

use crate::format::{DigitGrouping, format_decimal, group_digits};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Decimals used when a floating point value is printed in a report cell.
pub const DEFAULT_DECIMALS: usize = 2;

/// A record value as it arrives from the persistence layer, before stringification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Missing,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

impl CellValue {
    /// Renders the value the way report cells show it.
    ///
    /// Numbers carry thousands separators (floats with fixed decimals), booleans
    /// print literally and missing values become an empty string. Text that merely
    /// spells out an absent value ("None", "nan") is treated as missing.
    pub fn display_string(&self) -> String {
        self.display_with(DEFAULT_DECIMALS, DigitGrouping::Western)
    }

    pub fn display_with(&self, decimals: usize, grouping: DigitGrouping) -> String {
        match self {
            CellValue::Missing => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Integer(i) => {
                let grouped = group_digits(&i.unsigned_abs().to_string(), grouping);
                if *i < 0 {
                    format!("-{grouped}")
                } else {
                    grouped
                }
            }
            CellValue::Float(f) => format_decimal(*f, decimals, grouping),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            CellValue::Text(s) => match s.as_str() {
                "None" | "nan" | "NaN" => String::new(),
                _ => s.clone(),
            },
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        CellValue::Date(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_grouped() {
        assert_eq!(CellValue::Float(1234567.891).display_string(), "1,234,567.89");
        assert_eq!(CellValue::Integer(-45000).display_string(), "-45,000");
        assert_eq!(CellValue::Integer(12).display_string(), "12");
    }

    #[test]
    fn absent_values_are_empty() {
        assert_eq!(CellValue::Missing.display_string(), "");
        assert_eq!(CellValue::from("None").display_string(), "");
        assert_eq!(CellValue::from("nan").display_string(), "");
        assert_eq!(CellValue::Float(f64::NAN).display_string(), "");
        assert_eq!(CellValue::from(None::<i64>).display_string(), "");
    }

    #[test]
    fn dates_and_booleans() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(CellValue::Date(d).display_string(), "2024-03-09");
        let dt = d.and_hms_opt(14, 5, 0).unwrap();
        assert_eq!(CellValue::DateTime(dt).display_string(), "2024-03-09 14:05");
        assert_eq!(CellValue::Bool(true).display_string(), "true");
    }
}
