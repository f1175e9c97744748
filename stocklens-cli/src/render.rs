//! Plain-text rendering of reports and bar tables.

use std::fmt::Write;

use stocklens_core::report::keys;
use stocklens_core::{MetricValue, MetricsReport, PriceSeries};

const NOT_APPLICABLE: &str = "n/a";
const UNDEFINED: &str = "undefined";

/// Four decimals for scalars; a series shows its final-position value.
pub fn format_value(value: &MetricValue) -> String {
    match value {
        MetricValue::Scalar(v) => format!("{v:.4}"),
        MetricValue::Series(series) => match series.last() {
            Some(v) => format!("{v:.4}"),
            None => UNDEFINED.to_string(),
        },
        MetricValue::Undefined => UNDEFINED.to_string(),
        MetricValue::Absent => NOT_APPLICABLE.to_string(),
    }
}

/// Thousands separators: 1234567 -> "1,234,567".
pub fn format_volume(volume: u64) -> String {
    let digits = volume.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Signed percent with two decimals; missing renders as "-".
pub fn format_return(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.2}%", v * 100.0),
        None => "-".to_string(),
    }
}

fn label(report: &MetricsReport, key: &str) -> String {
    let c = &report.config;
    match key {
        keys::MEAN_DAILY_RETURN => "Mean Daily Return".into(),
        keys::ANNUALIZED_RETURN => "Annualized Return".into(),
        keys::DAILY_VOLATILITY => "Daily Volatility".into(),
        keys::ANNUALIZED_VOLATILITY => "Annualized Volatility".into(),
        keys::STANDARD_DEVIATION => "Price Std Dev".into(),
        keys::DAILY_RETURN => "Daily Return".into(),
        keys::SMA => format!("SMA ({})", c.sma_window),
        keys::EMA => format!("EMA ({})", c.ema_window),
        keys::MACD => "MACD (12, 26)".into(),
        keys::BOLLINGER_UPPER => format!("Bollinger Upper ({})", c.bollinger_window),
        keys::BOLLINGER_LOWER => format!("Bollinger Lower ({})", c.bollinger_window),
        keys::RSI => format!("RSI ({})", c.rsi_window),
        keys::STOCHASTIC_OSCILLATOR => format!("Stochastic %K ({})", c.stochastic_window),
        keys::SHARPE_RATIO => "Sharpe Ratio".into(),
        keys::SORTINO_RATIO => "Sortino Ratio".into(),
        keys::MAXIMUM_DRAWDOWN => "Max Drawdown".into(),
        keys::BETA => "Beta".into(),
        keys::ALPHA => "Alpha".into(),
        keys::R_SQUARED => "R-Squared".into(),
        keys::TREYNOR_RATIO => "Treynor Ratio".into(),
        other => other.to_string(),
    }
}

const SECTIONS: [(&str, &[&str]); 4] = [
    (
        "Returns",
        &[
            keys::MEAN_DAILY_RETURN,
            keys::ANNUALIZED_RETURN,
            keys::DAILY_VOLATILITY,
            keys::ANNUALIZED_VOLATILITY,
            keys::STANDARD_DEVIATION,
            keys::DAILY_RETURN,
        ],
    ),
    (
        "Indicators (latest)",
        &[
            keys::SMA,
            keys::EMA,
            keys::MACD,
            keys::BOLLINGER_UPPER,
            keys::BOLLINGER_LOWER,
            keys::RSI,
            keys::STOCHASTIC_OSCILLATOR,
        ],
    ),
    (
        "Risk",
        &[keys::SHARPE_RATIO, keys::SORTINO_RATIO, keys::MAXIMUM_DRAWDOWN],
    ),
    ("Benchmark", &keys::BENCHMARK),
];

/// Summary view of a report, grouped by section.
pub fn render_report(report: &MetricsReport) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = writeln!(out, "=== Metrics Report ===");
    let _ = writeln!(out, "{:<24}{}", "Symbol:", report.symbol);
    let _ = writeln!(
        out,
        "{:<24}{}",
        "Benchmark:",
        report.benchmark_symbol.as_deref().unwrap_or(NOT_APPLICABLE)
    );
    let _ = writeln!(out, "{:<24}{} to {}", "Period:", report.start, report.end);
    let _ = writeln!(out, "{:<24}{}", "Bars:", report.bar_count);
    let _ = writeln!(
        out,
        "{:<24}{:.2}%",
        "Risk-Free Rate:",
        report.config.risk_free_rate * 100.0
    );

    for (title, section) in SECTIONS {
        let _ = writeln!(out);
        let _ = writeln!(out, "--- {title} ---");
        for key in section {
            let value = report
                .get(key)
                .map(format_value)
                .unwrap_or_else(|| NOT_APPLICABLE.to_string());
            let _ = writeln!(out, "{:<24}{:>14}", format!("{}:", label(report, key)), value);
        }
    }
    out
}

/// Bar table with daily returns. `limit` keeps only the most recent rows.
pub fn render_bars(series: &PriceSeries, returns: &[Option<f64>], limit: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12}{:>11}{:>11}{:>11}{:>11}{:>11}{:>10}{:>16}",
        "Date", "Open", "High", "Low", "Close", "Adj Close", "Return", "Volume"
    );
    let _ = writeln!(out, "{}", "-".repeat(93));

    let skip = limit.map_or(0, |n| series.len().saturating_sub(n));
    for (bar, ret) in series.bars().iter().zip(returns).skip(skip) {
        let _ = writeln!(
            out,
            "{:<12}{:>11.2}{:>11.2}{:>11.2}{:>11.2}{:>11.2}{:>10}{:>16}",
            bar.date.to_string(),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.adjusted_close,
            format_return(*ret),
            format_volume(bar.volume),
        );
    }
    out
}
