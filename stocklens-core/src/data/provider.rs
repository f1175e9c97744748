//! Price provider trait and structured fetch errors.
//!
//! The PriceProvider trait abstracts over where price history comes from
//! (local CSV exports, a vendor API) so the metrics engine never performs I/O
//! and tests can supply series directly.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::PriceSeries;
use crate::error::InputError;

/// Structured error types for fetching price history.
///
/// Displayable in CLI context without further wrapping.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("symbol not found: {symbol}")]
    NotFound { symbol: String },

    #[error("invalid date range: start {start} is after end {end}")]
    RangeInvalid { start: NaiveDate, end: NaiveDate },

    #[error("network unreachable: {0}")]
    Network(String),

    #[error("read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse '{path}' line {line}: {message}")]
    Parse {
        path: String,
        line: u64,
        message: String,
    },

    #[error("invalid price data: {0}")]
    Input(#[from] InputError),
}

/// Source of daily price history.
///
/// Returns the bars for `symbol` within `[start, end]` inclusive. A known
/// symbol with no bars in range yields an empty series, not an error.
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<PriceSeries, FetchError>;
}

/// Reject ranges whose start lies after their end.
pub fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), FetchError> {
    if start > end {
        return Err(FetchError::RangeInvalid { start, end });
    }
    Ok(())
}
