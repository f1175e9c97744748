//! StockLens CLI: metrics reports and bar tables from local price history.
//!
//! Commands:
//! - `report`: compute the full metrics report for a symbol, optionally
//!   against a benchmark, as a text summary or JSON
//! - `bars`: print the price bars with daily returns

mod render;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use stocklens_core::data::{CsvProvider, PriceProvider};
use stocklens_core::returns::daily_return;
use stocklens_core::{compute_full_report, PriceSeries, ReportConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "stocklens",
    about = "StockLens CLI: return, indicator, and risk metrics for daily price history"
)]
struct Cli {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Where price history comes from and which dates to keep.
#[derive(Args)]
struct SourceArgs {
    /// Directory holding one `<SYMBOL>.csv` file per symbol.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Start date (YYYY-MM-DD), inclusive. Defaults to the first bar on file.
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD), inclusive. Defaults to the last bar on file.
    #[arg(long)]
    end: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full metrics report for a symbol.
    Report {
        /// Symbol to analyze (e.g., AAPL).
        symbol: String,

        /// Benchmark symbol for beta, alpha, R-squared, and Treynor (e.g., SPY).
        #[arg(long)]
        market: Option<String>,

        #[command(flatten)]
        source: SourceArgs,

        /// Path to a TOML report config (indicator windows, risk-free rate).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Annualized risk-free rate as a fraction (0.02 = 2%). Overrides the config file.
        #[arg(long)]
        risk_free_rate: Option<f64>,

        /// Emit the report as JSON instead of a text summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print price bars with daily returns.
    Bars {
        /// Symbol to print (e.g., AAPL).
        symbol: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Show only the most recent N bars.
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    match cli.command {
        Commands::Report {
            symbol,
            market,
            source,
            config,
            risk_free_rate,
            json,
        } => run_report(&symbol, market.as_deref(), &source, config, risk_free_rate, json),
        Commands::Bars {
            symbol,
            source,
            limit,
        } => run_bars(&symbol, &source, limit),
    }
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

fn run_report(
    symbol: &str,
    market: Option<&str>,
    source: &SourceArgs,
    config_path: Option<PathBuf>,
    risk_free_rate: Option<f64>,
    json: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => ReportConfig::from_file(&path)
            .with_context(|| format!("loading report config {}", path.display()))?,
        None => ReportConfig::default(),
    };
    if let Some(rate) = risk_free_rate {
        config.risk_free_rate = rate;
    }
    config.validate().context("invalid report config")?;

    let provider = CsvProvider::new(&source.data_dir);
    let stock = load_series(&provider, symbol, source)?;
    let benchmark = market
        .map(|m| load_series(&provider, m, source))
        .transpose()?;

    let report = compute_full_report(&stock, benchmark.as_ref(), &config)
        .with_context(|| format!("computing report for {symbol}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_report(&report));
    }
    Ok(())
}

fn run_bars(symbol: &str, source: &SourceArgs, limit: Option<usize>) -> Result<()> {
    let provider = CsvProvider::new(&source.data_dir);
    let series = load_series(&provider, symbol, source)?;
    if series.is_empty() {
        println!("No bars for {symbol} in the requested range.");
        return Ok(());
    }
    let returns = daily_return(&series);
    print!(
        "{}",
        render::render_bars(&series, returns.values().as_slice(), limit)
    );
    Ok(())
}

fn load_series(
    provider: &dyn PriceProvider,
    symbol: &str,
    source: &SourceArgs,
) -> Result<PriceSeries> {
    let start = parse_date(source.start.as_deref())?.unwrap_or(NaiveDate::MIN);
    let end = parse_date(source.end.as_deref())?.unwrap_or(NaiveDate::MAX);
    let series = provider
        .fetch(symbol, start, end)
        .with_context(|| format!("fetching {symbol} from {}", provider.name()))?;
    tracing::info!(symbol, bars = series.len(), "loaded price history");
    Ok(series)
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.map(|s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
    })
    .transpose()
}
