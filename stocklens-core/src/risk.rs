//! Risk-adjusted ratios and drawdown.
//!
//! Every function is pure and returns `None` where the ratio is undefined
//! (zero denominator, too few observations). Benchmark-relative functions take
//! the benchmark as a required argument; deciding what to report when no
//! benchmark was supplied is the report's job.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{PriceSeries, ReturnSeries};
use crate::returns::TRADING_DAYS_PER_YEAR;
use crate::stats;

/// Annualized risk-free rate used when the caller supplies none.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Mean daily return in excess of the de-annualized risk-free rate.
fn daily_excess_return(mean_daily_return: f64, risk_free_rate: f64) -> f64 {
    mean_daily_return - risk_free_rate / TRADING_DAYS_PER_YEAR
}

fn annualized_ratio(excess: f64, deviation: f64) -> Option<f64> {
    if !deviation.is_finite() || deviation == 0.0 {
        return None;
    }
    let ratio = TRADING_DAYS_PER_YEAR.sqrt() * excess / deviation;
    ratio.is_finite().then_some(ratio)
}

/// Annualized Sharpe ratio.
///
/// sqrt(252) * (mean_daily_return - rf / 252) / daily_volatility.
/// `None` when volatility is zero.
pub fn sharpe_ratio(mean_daily_return: f64, daily_volatility: f64, risk_free_rate: f64) -> Option<f64> {
    annualized_ratio(
        daily_excess_return(mean_daily_return, risk_free_rate),
        daily_volatility,
    )
}

/// Sample standard deviation of the negative returns only.
///
/// `None` with fewer than two negative returns: a downside deviation does not
/// exist when nothing went down, and is not zero.
pub fn downside_deviation(returns: &ReturnSeries) -> Option<f64> {
    let negatives: Vec<f64> = returns.defined().filter(|r| *r < 0.0).collect();
    stats::sample_std(&negatives)
}

/// Annualized Sortino ratio: Sharpe's numerator over the downside deviation.
pub fn sortino_ratio(mean_daily_return: f64, returns: &ReturnSeries, risk_free_rate: f64) -> Option<f64> {
    annualized_ratio(
        daily_excess_return(mean_daily_return, risk_free_rate),
        downside_deviation(returns)?,
    )
}

/// Pair stock and market returns on the dates where both are defined.
///
/// Trading calendars can differ (listings, halts, exchange holidays), so
/// pairing is by date rather than by position.
pub fn overlapping_returns(stock: &ReturnSeries, market: &ReturnSeries) -> Vec<(f64, f64)> {
    let market_by_date: HashMap<NaiveDate, f64> = market.dated().collect();
    stock
        .dated()
        .filter_map(|(date, s)| market_by_date.get(&date).map(|m| (s, *m)))
        .collect()
}

/// Beta: cov(stock, market) / var(market) over overlapping dates.
///
/// `None` with fewer than two overlapping returns or a flat market.
pub fn beta(stock: &ReturnSeries, market: &ReturnSeries) -> Option<f64> {
    let pairs = overlapping_returns(stock, market);
    if pairs.len() < 2 {
        tracing::warn!(
            overlap = pairs.len(),
            "too few overlapping returns to estimate beta"
        );
        return None;
    }
    let cov = stats::sample_covariance(&pairs)?;
    let market_only: Vec<f64> = pairs.iter().map(|p| p.1).collect();
    let var = stats::sample_variance(&market_only)?;
    if var == 0.0 {
        return None;
    }
    Some(cov / var)
}

/// Jensen's alpha on annualized returns.
///
/// stock - (rf + beta * (market - rf)); `None` when beta is absent.
pub fn alpha(
    stock_annualized_return: f64,
    market_annualized_return: f64,
    beta: Option<f64>,
    risk_free_rate: f64,
) -> Option<f64> {
    let beta = beta.filter(|b| b.is_finite())?;
    let a = stock_annualized_return
        - (risk_free_rate + beta * (market_annualized_return - risk_free_rate));
    a.is_finite().then_some(a)
}

/// Square of the Pearson correlation between overlapping returns.
pub fn r_squared(stock: &ReturnSeries, market: &ReturnSeries) -> Option<f64> {
    let pairs = overlapping_returns(stock, market);
    stats::pearson(&pairs).map(|r| r * r)
}

/// Treynor ratio: (stock - rf) / beta. `None` when beta is zero or absent.
pub fn treynor_ratio(stock_annualized_return: f64, beta: Option<f64>, risk_free_rate: f64) -> Option<f64> {
    let beta = beta.filter(|b| b.is_finite() && *b != 0.0)?;
    let t = (stock_annualized_return - risk_free_rate) / beta;
    t.is_finite().then_some(t)
}

/// Largest peak-to-trough decline of adjusted close, as a positive fraction.
///
/// Single pass with a running peak. 0.0 for a non-decreasing series;
/// `None` only for an empty series.
pub fn maximum_drawdown(series: &PriceSeries) -> Option<f64> {
    let mut prices = series.bars().iter().map(|b| b.adjusted_close);
    let mut peak = prices.next()?;
    let mut max_dd = 0.0_f64;

    for price in prices {
        if price > peak {
            peak = price;
        }
        let dd = (peak - price) / peak;
        if dd > max_dd {
            max_dd = dd;
        }
    }
    Some(max_dd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_bars::{bar_on, day};
    use crate::domain::MetricSeries;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};
    use crate::returns::{daily_return, daily_volatility, mean_daily_return};

    fn returns(values: &[Option<f64>]) -> ReturnSeries {
        let dates = (0..values.len()).map(|i| day(i as i64)).collect();
        ReturnSeries::new(dates, MetricSeries::new(values.to_vec()))
    }

    // ── Sharpe ──

    #[test]
    fn sharpe_known_value() {
        let s = sharpe_ratio(0.001, 0.01, 0.02).unwrap();
        let expected = 252.0_f64.sqrt() * (0.001 - 0.02 / 252.0) / 0.01;
        assert_approx(s, expected, DEFAULT_EPSILON);
    }

    #[test]
    fn sharpe_zero_volatility_is_undefined() {
        assert_eq!(sharpe_ratio(0.001, 0.0, 0.02), None);
    }

    #[test]
    fn sharpe_from_price_series() {
        let series = make_series(&[100.0, 101.0, 100.5, 102.0, 103.0, 102.5]);
        let r = daily_return(&series);
        let mean = mean_daily_return(&r).unwrap();
        let vol = daily_volatility(&r).unwrap();
        let s = sharpe_ratio(mean, vol, 0.0).unwrap();
        assert!(s > 0.0);
    }

    // ── Sortino ──

    #[test]
    fn sortino_uses_only_negative_returns() {
        let r = returns(&[None, Some(0.05), Some(-0.01), Some(0.03), Some(-0.03)]);
        // negatives -0.01, -0.03 → sample std = sqrt(0.0002)
        let dd = downside_deviation(&r).unwrap();
        assert_approx(dd, 0.0002_f64.sqrt(), 1e-12);

        let s = sortino_ratio(0.01, &r, 0.02).unwrap();
        let expected = 252.0_f64.sqrt() * (0.01 - 0.02 / 252.0) / dd;
        assert_approx(s, expected, 1e-9);
    }

    #[test]
    fn sortino_without_losses_is_undefined() {
        let r = returns(&[None, Some(0.01), Some(0.02), Some(0.0)]);
        assert_eq!(downside_deviation(&r), None);
        assert_eq!(sortino_ratio(0.01, &r, 0.02), None);
    }

    #[test]
    fn sortino_single_loss_is_undefined() {
        let r = returns(&[None, Some(0.01), Some(-0.02)]);
        assert_eq!(sortino_ratio(0.01, &r, 0.02), None);
    }

    #[test]
    fn sortino_equal_losses_is_undefined() {
        let r = returns(&[None, Some(-0.01), Some(-0.01), Some(0.04)]);
        assert_eq!(downside_deviation(&r), Some(0.0));
        assert_eq!(sortino_ratio(0.01, &r, 0.02), None);
    }

    // ── Beta / R² ──

    #[test]
    fn beta_of_levered_market() {
        let market = returns(&[None, Some(0.01), Some(-0.02), Some(0.015), Some(0.005)]);
        let stock = returns(&[None, Some(0.02), Some(-0.04), Some(0.03), Some(0.01)]);
        assert_approx(beta(&stock, &market).unwrap(), 2.0, 1e-9);
        assert_approx(r_squared(&stock, &market).unwrap(), 1.0, 1e-9);
    }

    #[test]
    fn beta_of_market_against_itself_is_one() {
        let market = returns(&[None, Some(0.01), Some(-0.02), Some(0.015)]);
        assert_approx(beta(&market, &market).unwrap(), 1.0, 1e-12);
    }

    #[test]
    fn beta_aligns_on_dates_not_positions() {
        // market is missing day 2; the stock's day-2 return must be dropped
        let market = ReturnSeries::new(
            vec![day(0), day(1), day(3), day(4)],
            MetricSeries::new(vec![None, Some(0.01), Some(-0.02), Some(0.03)]),
        );
        let stock = returns(&[None, Some(0.02), Some(0.5), Some(-0.04), Some(0.06)]);
        let pairs = overlapping_returns(&stock, &market);
        assert_eq!(pairs, vec![(0.02, 0.01), (-0.04, -0.02), (0.06, 0.03)]);
        assert_approx(beta(&stock, &market).unwrap(), 2.0, 1e-9);
    }

    #[test]
    fn beta_flat_market_is_undefined() {
        let market = returns(&[None, Some(0.0), Some(0.0), Some(0.0)]);
        let stock = returns(&[None, Some(0.01), Some(-0.01), Some(0.02)]);
        assert_eq!(beta(&stock, &market), None);
        assert_eq!(r_squared(&stock, &market), None);
    }

    #[test]
    fn beta_without_overlap_is_undefined() {
        let market = returns(&[None, Some(0.01)]);
        let stock = returns(&[None, Some(0.02)]);
        assert_eq!(beta(&stock, &market), None);
    }

    #[test]
    fn r_squared_is_bounded() {
        let market = returns(&[None, Some(0.01), Some(-0.02), Some(0.015), Some(0.0)]);
        let stock = returns(&[None, Some(-0.01), Some(0.01), Some(0.02), Some(-0.03)]);
        let r2 = r_squared(&stock, &market).unwrap();
        assert!((0.0..=1.0).contains(&r2));
    }

    // ── Alpha / Treynor ──

    #[test]
    fn alpha_known_value() {
        // 0.15 - (0.02 + 1.2 * (0.10 - 0.02)) = 0.034
        assert_approx(alpha(0.15, 0.10, Some(1.2), 0.02).unwrap(), 0.034, 1e-12);
    }

    #[test]
    fn alpha_without_beta_is_absent() {
        assert_eq!(alpha(0.15, 0.10, None, 0.02), None);
    }

    #[test]
    fn treynor_known_value() {
        assert_approx(treynor_ratio(0.12, Some(0.5), 0.02).unwrap(), 0.2, 1e-12);
    }

    #[test]
    fn treynor_zero_beta_is_undefined() {
        assert_eq!(treynor_ratio(0.12, Some(0.0), 0.02), None);
        assert_eq!(treynor_ratio(0.12, None, 0.02), None);
    }

    // ── Drawdown ──

    #[test]
    fn drawdown_constant_is_zero() {
        assert_eq!(maximum_drawdown(&make_series(&[50.0; 5])), Some(0.0));
    }

    #[test]
    fn drawdown_increasing_is_zero() {
        assert_eq!(
            maximum_drawdown(&make_series(&[1.0, 2.0, 3.0, 10.0])),
            Some(0.0)
        );
    }

    #[test]
    fn drawdown_decreasing_is_total_decline() {
        let dd = maximum_drawdown(&make_series(&[100.0, 90.0, 80.0, 75.0])).unwrap();
        assert_approx(dd, 0.25, DEFAULT_EPSILON);
    }

    #[test]
    fn drawdown_uses_running_peak() {
        // peak 120 → trough 90 = 25%; later 100 → 95 is only 5%
        let dd = maximum_drawdown(&make_series(&[100.0, 120.0, 90.0, 130.0, 125.0])).unwrap();
        assert_approx(dd, 0.25, DEFAULT_EPSILON);
    }

    #[test]
    fn drawdown_empty_series_is_undefined() {
        assert_eq!(maximum_drawdown(&PriceSeries::empty("X")), None);
    }

    #[test]
    fn drawdown_single_bar_is_zero() {
        let series = PriceSeries::new("X", vec![bar_on(day(0), 10.0)]).unwrap();
        assert_eq!(maximum_drawdown(&series), Some(0.0));
    }
}
