//! Full metrics report: the single entry point for consumers.
//!
//! Validates the input, computes returns once, then threads them through every
//! metric. One undefined metric never blocks the rest: each entry carries its
//! own `Scalar` / `Series` / `Undefined` / `Absent` value.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::domain::{MetricValue, PriceSeries, ReturnSeries};
use crate::error::InputError;
use crate::indicators::{bollinger_bands, ema, macd, rsi, sma, stochastic_oscillator};
use crate::returns::{
    annualized_return, annualized_volatility, daily_return, daily_volatility, mean_daily_return,
    standard_deviation,
};
use crate::risk;

/// Stable bundle keys.
pub mod keys {
    pub const MEAN_DAILY_RETURN: &str = "mean_daily_return";
    pub const ANNUALIZED_RETURN: &str = "annualized_return";
    pub const DAILY_VOLATILITY: &str = "daily_volatility";
    pub const ANNUALIZED_VOLATILITY: &str = "annualized_volatility";
    pub const STANDARD_DEVIATION: &str = "standard_deviation";
    pub const DAILY_RETURN: &str = "daily_return";
    pub const SMA: &str = "sma";
    pub const EMA: &str = "ema";
    pub const MACD: &str = "macd";
    pub const BOLLINGER_UPPER: &str = "bollinger_upper";
    pub const BOLLINGER_LOWER: &str = "bollinger_lower";
    pub const RSI: &str = "rsi";
    pub const STOCHASTIC_OSCILLATOR: &str = "stochastic_oscillator";
    pub const SHARPE_RATIO: &str = "sharpe_ratio";
    pub const SORTINO_RATIO: &str = "sortino_ratio";
    pub const MAXIMUM_DRAWDOWN: &str = "maximum_drawdown";
    pub const BETA: &str = "beta";
    pub const ALPHA: &str = "alpha";
    pub const R_SQUARED: &str = "r_squared";
    pub const TREYNOR_RATIO: &str = "treynor_ratio";

    /// Every key, in the order a summary view lists them.
    pub const ALL: [&str; 20] = [
        MEAN_DAILY_RETURN,
        ANNUALIZED_RETURN,
        DAILY_VOLATILITY,
        ANNUALIZED_VOLATILITY,
        STANDARD_DEVIATION,
        DAILY_RETURN,
        SMA,
        EMA,
        MACD,
        BOLLINGER_UPPER,
        BOLLINGER_LOWER,
        RSI,
        STOCHASTIC_OSCILLATOR,
        SHARPE_RATIO,
        SORTINO_RATIO,
        MAXIMUM_DRAWDOWN,
        BETA,
        ALPHA,
        R_SQUARED,
        TREYNOR_RATIO,
    ];

    /// Keys that need a benchmark series.
    pub const BENCHMARK: [&str; 4] = [BETA, ALPHA, R_SQUARED, TREYNOR_RATIO];
}

/// Result bundle for one stock (and optional benchmark).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub symbol: String,
    pub benchmark_symbol: Option<String>,
    pub bar_count: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub config: ReportConfig,
    metrics: BTreeMap<String, MetricValue>,
}

impl MetricsReport {
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.metrics.get(name)
    }

    /// Scalar value of `name`; `None` when undefined, absent, or a series.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(MetricValue::as_scalar)
    }

    /// Value at the final bar of a series metric.
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.get(name)
            .and_then(MetricValue::as_series)
            .and_then(|s| s.last())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.metrics.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn has_benchmark(&self) -> bool {
        self.benchmark_symbol.is_some()
    }
}

/// Compute every metric for `stock`, plus benchmark-relative ratios when a
/// `market` series is given.
///
/// Fails only on unusable input (an empty series). The risk-free rate and
/// windows come from `config`.
pub fn compute_full_report(
    stock: &PriceSeries,
    market: Option<&PriceSeries>,
    config: &ReportConfig,
) -> Result<MetricsReport, InputError> {
    stock.ensure_non_empty()?;
    if let Some(m) = market {
        m.ensure_non_empty()?;
    }

    tracing::debug!(
        symbol = stock.symbol(),
        bars = stock.len(),
        benchmark = market.map(|m| m.symbol()),
        "computing metrics report"
    );

    let rf = config.risk_free_rate;
    let mut metrics = BTreeMap::new();
    let mut put = |key: &str, value: MetricValue| {
        metrics.insert(key.to_string(), value);
    };

    // Returns are derived once and threaded explicitly.
    let returns = daily_return(stock);
    let mean = mean_daily_return(&returns);
    let vol = daily_volatility(&returns);
    let stock_annual = mean.map(annualized_return);

    put(keys::MEAN_DAILY_RETURN, MetricValue::from_scalar(mean));
    put(keys::ANNUALIZED_RETURN, MetricValue::from_scalar(stock_annual));
    put(keys::DAILY_VOLATILITY, MetricValue::from_scalar(vol));
    put(
        keys::ANNUALIZED_VOLATILITY,
        MetricValue::from_scalar(vol.map(annualized_volatility)),
    );
    put(
        keys::STANDARD_DEVIATION,
        MetricValue::from_scalar(standard_deviation(stock)),
    );
    put(keys::DAILY_RETURN, MetricValue::Series(returns.values().clone()));

    put(keys::SMA, MetricValue::Series(sma(stock, config.sma_window)));
    put(keys::EMA, MetricValue::Series(ema(stock, config.ema_window)));
    put(keys::MACD, MetricValue::Series(macd(stock)));
    let (upper, lower) = bollinger_bands(stock, config.bollinger_window);
    put(keys::BOLLINGER_UPPER, MetricValue::Series(upper));
    put(keys::BOLLINGER_LOWER, MetricValue::Series(lower));
    put(keys::RSI, MetricValue::Series(rsi(stock, config.rsi_window)));
    put(
        keys::STOCHASTIC_OSCILLATOR,
        MetricValue::Series(stochastic_oscillator(stock, config.stochastic_window)),
    );

    let sharpe = match (mean, vol) {
        (Some(m), Some(v)) => risk::sharpe_ratio(m, v, rf),
        _ => None,
    };
    let sortino = mean.and_then(|m| risk::sortino_ratio(m, &returns, rf));
    put(keys::SHARPE_RATIO, MetricValue::from_scalar(sharpe));
    put(keys::SORTINO_RATIO, MetricValue::from_scalar(sortino));
    put(
        keys::MAXIMUM_DRAWDOWN,
        MetricValue::from_scalar(risk::maximum_drawdown(stock)),
    );

    match market {
        Some(market) => {
            for (key, value) in benchmark_metrics(&returns, stock_annual, market, rf) {
                put(key, value);
            }
        }
        None => {
            for key in keys::BENCHMARK {
                put(key, MetricValue::Absent);
            }
        }
    }

    let undefined: Vec<&str> = metrics
        .iter()
        .filter(|(_, v)| v.is_undefined())
        .map(|(k, _)| k.as_str())
        .collect();
    if !undefined.is_empty() {
        tracing::debug!(symbol = stock.symbol(), ?undefined, "metrics without a numeric answer");
    }

    Ok(MetricsReport {
        symbol: stock.symbol().to_string(),
        benchmark_symbol: market.map(|m| m.symbol().to_string()),
        bar_count: stock.len(),
        start: stock.first_date().unwrap_or_default(),
        end: stock.last_date().unwrap_or_default(),
        config: config.clone(),
        metrics,
    })
}

/// Convenience entry point: default windows with an optional risk-free rate.
pub fn compute_full_report_with_rate(
    stock: &PriceSeries,
    market: Option<&PriceSeries>,
    risk_free_rate: Option<f64>,
) -> Result<MetricsReport, InputError> {
    compute_full_report(stock, market, &ReportConfig::with_risk_free_rate(risk_free_rate))
}

/// Beta, alpha, R², and Treynor against a benchmark.
///
/// Alpha and Treynor compare annualized returns; the benchmark's is derived
/// from its own mean daily return, never from its raw prices.
fn benchmark_metrics(
    stock_returns: &ReturnSeries,
    stock_annual: Option<f64>,
    market: &PriceSeries,
    rf: f64,
) -> [(&'static str, MetricValue); 4] {
    let market_returns = daily_return(market);
    let market_annual = mean_daily_return(&market_returns).map(annualized_return);

    let beta = risk::beta(stock_returns, &market_returns);
    let alpha = match (stock_annual, market_annual) {
        (Some(s), Some(m)) => risk::alpha(s, m, beta, rf),
        _ => None,
    };
    let treynor = stock_annual.and_then(|s| risk::treynor_ratio(s, beta, rf));
    let r_squared = risk::r_squared(stock_returns, &market_returns);

    [
        (keys::BETA, MetricValue::from_scalar(beta)),
        (keys::ALPHA, MetricValue::from_scalar(alpha)),
        (keys::R_SQUARED, MetricValue::from_scalar(r_squared)),
        (keys::TREYNOR_RATIO, MetricValue::from_scalar(treynor)),
    ]
}
