//! PriceSeries and ReturnSeries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::bar::PriceBar;
use super::metric::MetricSeries;
use crate::error::InputError;

/// Ordered daily price history for one symbol.
///
/// Dates are strictly increasing with no duplicates; non-trading days are
/// simply absent. Every bar has finite, positive prices. An empty series is
/// valid to hold (a provider returns one for an inactive range) but cannot be
/// reported on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Validate and wrap bars. Fails fast on the first bad bar.
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, InputError> {
        for (i, bar) in bars.iter().enumerate() {
            bar.validate()?;
            if i > 0 && bar.date <= bars[i - 1].date {
                return Err(InputError::NonMonotonicDates {
                    index: i,
                    previous: bars[i - 1].date,
                    current: bar.date,
                });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// Error unless the series has at least one bar.
    pub fn ensure_non_empty(&self) -> Result<(), InputError> {
        if self.is_empty() {
            return Err(InputError::EmptySeries {
                symbol: self.symbol.clone(),
            });
        }
        Ok(())
    }

    /// Inclusive date sub-range. Ordering is preserved so no re-validation.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        PriceSeries {
            symbol: self.symbol.clone(),
            bars: self
                .bars
                .iter()
                .filter(|b| b.date >= start && b.date <= end)
                .cloned()
                .collect(),
        }
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn adjusted_closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.adjusted_close).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }
}

/// Daily fractional returns derived from a PriceSeries.
///
/// Aligned with the source series: one entry per bar, the first missing.
/// The dates are kept so two return series can be matched on overlapping
/// trading days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    values: MetricSeries,
}

impl ReturnSeries {
    /// `dates` and `values` must have equal length.
    pub(crate) fn new(dates: Vec<NaiveDate>, values: MetricSeries) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { dates, values }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &MetricSeries {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Defined returns only, in date order.
    pub fn defined(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.defined()
    }

    /// `(date, return)` for every defined position.
    pub fn dated(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates
            .iter()
            .zip(self.values.iter())
            .filter_map(|(d, v)| v.map(|v| (*d, v)))
    }
}
