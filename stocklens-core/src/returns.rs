//! Return and volatility primitives.
//!
//! Daily returns are computed once per series into a `ReturnSeries` and then
//! passed explicitly to every function that consumes them.

use crate::domain::{MetricSeries, PriceSeries, ReturnSeries};
use crate::stats;

/// Trading days per year used for every annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Fractional change in adjusted close from the previous bar.
///
/// r[i] = (adj[i] - adj[i-1]) / adj[i-1]; r[0] is missing.
pub fn daily_return(series: &PriceSeries) -> ReturnSeries {
    let adj = series.adjusted_closes();
    let values: MetricSeries = (0..adj.len())
        .map(|i| {
            if i == 0 {
                None
            } else {
                Some((adj[i] - adj[i - 1]) / adj[i - 1])
            }
        })
        .collect();
    ReturnSeries::new(series.dates(), values)
}

/// Mean of all defined daily returns. `None` for a series with no returns.
pub fn mean_daily_return(returns: &ReturnSeries) -> Option<f64> {
    let defined: Vec<f64> = returns.defined().collect();
    stats::mean(&defined)
}

/// Compound a mean daily return over a trading year: (1 + r)^252 - 1.
pub fn annualized_return(mean_daily_return: f64) -> f64 {
    (1.0 + mean_daily_return).powf(TRADING_DAYS_PER_YEAR) - 1.0
}

/// Sample standard deviation of defined daily returns.
pub fn daily_volatility(returns: &ReturnSeries) -> Option<f64> {
    let defined: Vec<f64> = returns.defined().collect();
    stats::sample_std(&defined)
}

/// Scale daily volatility by sqrt(252).
pub fn annualized_volatility(daily_volatility: f64) -> f64 {
    daily_volatility * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Sample standard deviation of the adjusted close prices themselves.
pub fn standard_deviation(series: &PriceSeries) -> Option<f64> {
    stats::sample_std(&series.adjusted_closes())
}
