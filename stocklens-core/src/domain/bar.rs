//! PriceBar: one trading day of OHLCV data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Daily OHLCV bar for a single symbol.
///
/// `adjusted_close` corrects for splits and dividends and is the price every
/// return, trend, and risk metric is computed from. The raw `high`, `low`, and
/// `close` are used only by the stochastic oscillator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adjusted_close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Check that every price field is finite and strictly positive.
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), InputError> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("adjusted_close", self.adjusted_close),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(InputError::InvalidPrice {
                    date: self.date,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Basic OHLC sanity: high is the bar's maximum and low its minimum.
    ///
    /// Vendors occasionally publish bars that violate this; they are kept
    /// (the metrics remain computable) but flagged by the CSV loader.
    pub fn is_consistent(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}
