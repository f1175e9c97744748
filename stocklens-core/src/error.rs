//! Input error taxonomy.
//!
//! Only malformed input is an error. Numeric non-answers (zero volatility,
//! flat windows, missing benchmark) are carried as values in the report.

use chrono::NaiveDate;
use thiserror::Error;

/// A price series that cannot be analysed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("price series for '{symbol}' is empty")]
    EmptySeries { symbol: String },

    #[error("dates must be strictly increasing: bar {index} ({current}) does not follow {previous}")]
    NonMonotonicDates {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("invalid {field} on {date}: {value} (prices must be finite and positive)")]
    InvalidPrice {
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },
}
