//! Invoice arithmetic.
//!
//! All amounts are fixed-point: money carries two decimals, quantities three and
//! percentages two. Every rounding step is half-up, so results never depend on
//! binary floating point representation.

use thiserror::Error;

pub mod calculator;
mod decimal;
pub mod money;
pub mod words;

pub use calculator::{Totals, compute_totals, compute_totals_from_amounts, line_amount, line_tax};
pub use money::{Money, Percent, Quantity};
pub use words::{Currency, NumberingSystem, amount_in_words, amount_in_words_f64, integer_to_words};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinanceError {
    #[error("Invalid amount '{0}': expected a finite, non-negative number.")]
    InvalidAmount(String),
    #[error("Invalid percentage '{0}': expected a value between 0 and 100.")]
    InvalidPercent(String),
    #[error("Amount overflowed the supported range while computing {0}.")]
    Overflow(&'static str),
}
