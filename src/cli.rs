//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_report::CsvReport;
use crate::adapters::csv_trade_log::CsvTradeLog;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::manual_clock::ManualClock;
use crate::adapters::system_clock::SystemClock;
use crate::domain::config_validation::{
    EXCHANGE_SECTION, listed_symbols, required_int, stock_type, validate_exchange_config,
};
use crate::domain::error::GbceError;
use crate::domain::exchange::Exchange;
use crate::domain::sample::sample_exchange;
use crate::domain::stock::{DEFAULT_VWAP_WINDOW_MINUTES, Stock, StockType};
use crate::domain::summary::MarketSummary;
use crate::domain::trade::TradeIndicator;
use crate::ports::clock_port::ClockPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;
use crate::ports::trade_log_port::{TradeEntry, TradeLogPort};

#[derive(Parser, Debug)]
#[command(name = "gbce", about = "Super simple stock exchange")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a fixed set of trades and print the resulting metrics
    Demo {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Dividend yield and P/E ratio of one stock at a given price
    Quote {
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long, allow_hyphen_values = true)]
        price: f64,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Replay a CSV trade log and summarise the market as of its last trade
    Replay {
        #[arg(short, long)]
        trades: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        window: Option<u32>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a stock configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Demo { config } => run_demo(config.as_ref()),
        Command::Quote {
            symbol,
            price,
            config,
        } => run_quote(&symbol, price, config.as_ref()),
        Command::Replay {
            trades,
            config,
            window,
            output,
        } => run_replay(&trades, config.as_ref(), window, output.as_ref()),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = GbceError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Validates the configuration, then builds its stocks in listed order.
pub fn build_stocks(config: &dyn ConfigPort) -> Result<Vec<Stock>, GbceError> {
    validate_exchange_config(config)?;

    let mut stocks = Vec::new();
    for symbol in listed_symbols(config)? {
        let kind = stock_type(config, &symbol)?;
        let last_dividend = required_int(config, &symbol, "last_dividend")? as u64;
        let par_value = required_int(config, &symbol, "par_value")? as u64;
        let fixed_dividend = match kind {
            StockType::Preferred => config.get_double(&symbol, "fixed_dividend").ok().flatten(),
            StockType::Common => None,
        };
        stocks.push(Stock::new(
            symbol,
            kind,
            last_dividend,
            fixed_dividend,
            par_value,
        ));
    }
    Ok(stocks)
}

/// Exchange from configuration, or the sample exchange when none is given.
pub fn build_exchange<C: ClockPort>(
    config: Option<&dyn ConfigPort>,
    clock: C,
) -> Result<Exchange<C>, GbceError> {
    let Some(config) = config else {
        return Ok(sample_exchange(clock));
    };

    let stocks = build_stocks(config)?;
    let window = config
        .get_int(EXCHANGE_SECTION, "window_minutes")
        .ok()
        .flatten()
        .map_or(DEFAULT_VWAP_WINDOW_MINUTES, |w| w as u32);

    let mut exchange = Exchange::new(clock).with_window(window);
    for stock in stocks {
        exchange.add_stock(stock);
    }
    Ok(exchange)
}

fn exchange_from_args<C: ClockPort>(
    config_path: Option<&PathBuf>,
    clock: C,
) -> Result<Exchange<C>, ExitCode> {
    let adapter = match config_path {
        Some(path) => {
            eprintln!("Loading stocks from {}", path.display());
            Some(load_config(path)?)
        }
        None => None,
    };
    build_exchange(adapter.as_ref().map(|a| a as &dyn ConfigPort), clock).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Trades recorded by `gbce demo`: (symbol, quantity, indicator, price).
pub const DEMO_TRADES: &[(&str, i64, TradeIndicator, f64)] = &[
    ("TEA", 100, TradeIndicator::Buy, 150.0),
    ("POP", 200, TradeIndicator::Buy, 95.0),
    ("POP", 100, TradeIndicator::Sell, 101.0),
    ("ALE", 50, TradeIndicator::Sell, 240.0),
    ("GIN", 300, TradeIndicator::Buy, 112.0),
    ("JOE", 75, TradeIndicator::Buy, 260.0),
    ("JOE", 25, TradeIndicator::Sell, 255.0),
];

fn run_demo(config_path: Option<&PathBuf>) -> ExitCode {
    let mut exchange = match exchange_from_args(config_path, SystemClock) {
        Ok(e) => e,
        Err(code) => return code,
    };

    for &(symbol, quantity, indicator, price) in DEMO_TRADES {
        match exchange.record_trade(symbol, quantity, indicator, price) {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                eprintln!("warning: skipping demo trade for {symbol} (not configured)");
            }
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    report_summary(&exchange, None)
}

fn run_quote(symbol: &str, price: f64, config_path: Option<&PathBuf>) -> ExitCode {
    let exchange = match exchange_from_args(config_path, SystemClock) {
        Ok(e) => e,
        Err(code) => return code,
    };

    let symbol = symbol.to_uppercase();
    let quote = exchange.get_stock(&symbol).and_then(|stock| {
        Ok((
            stock.calculate_dividend_yield(price)?,
            stock.calculate_pe_ratio(price)?,
        ))
    });

    match quote {
        Ok((dividend_yield, pe_ratio)) => {
            println!("{symbol} at {price}");
            println!("  Dividend yield: {dividend_yield:.6}");
            match pe_ratio {
                Some(pe) => println!("  P/E ratio:      {pe:.4}"),
                None => println!("  P/E ratio:      undefined (no dividend)"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayStats {
    pub recorded: usize,
    pub skipped: usize,
}

/// Records each entry at its own timestamp by moving the manual clock.
/// Entries the exchange rejects are skipped with a warning.
pub fn replay_trades(
    exchange: &mut Exchange<ManualClock>,
    entries: &[TradeEntry],
) -> ReplayStats {
    let mut stats = ReplayStats::default();
    for entry in entries {
        exchange.clock().set(entry.timestamp);
        match exchange.record_trade(&entry.symbol, entry.quantity, entry.indicator, entry.price) {
            Ok(()) => stats.recorded += 1,
            Err(e) => {
                log::warn!("rejected trade {entry:?}: {e}");
                eprintln!(
                    "warning: skipping {} trade at {} ({})",
                    entry.symbol, entry.timestamp, e
                );
                stats.skipped += 1;
            }
        }
    }
    stats
}

fn run_replay(
    trades_path: &PathBuf,
    config_path: Option<&PathBuf>,
    window: Option<u32>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    eprintln!("Loading trades from {}", trades_path.display());
    let entries = match CsvTradeLog::new(trades_path.clone()).load_trades() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let start = entries
        .first()
        .map(|e| e.timestamp)
        .unwrap_or_else(|| SystemClock.now());
    let exchange = match exchange_from_args(config_path, ManualClock::new(start)) {
        Ok(e) => e,
        Err(code) => return code,
    };
    let mut exchange = match window {
        Some(w) => exchange.with_window(w),
        None => exchange,
    };

    let stats = replay_trades(&mut exchange, &entries);
    log::info!(
        "replayed {} trades ({} skipped)",
        stats.recorded,
        stats.skipped
    );
    eprintln!("Replayed {} of {} trades", stats.recorded, entries.len());

    report_summary(&exchange, output_path)
}

fn report_summary<C: ClockPort>(
    exchange: &Exchange<C>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    let summary = match MarketSummary::compute(exchange) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match output_path {
        Some(path) => {
            let path = path.display().to_string();
            if let Err(e) = CsvReport.write(&summary, &path) {
                eprintln!("error: {e}");
                return (&e).into();
            }
            eprintln!("Report written to {path}");
        }
        None => print!("{}", format_summary(&summary)),
    }
    ExitCode::SUCCESS
}

pub fn format_summary(summary: &MarketSummary) -> String {
    let dash = || "-".to_string();
    let mut out = format!(
        "As of {} (window {} min)\n{:<6} {:<9} {:>10} {:>10} {:>10} {:>6}\n",
        summary.as_of.to_rfc3339(),
        summary.window_minutes,
        "SYMBOL",
        "TYPE",
        "VWAP",
        "YIELD",
        "P/E",
        "TRADES"
    );
    for row in &summary.stocks {
        out.push_str(&format!(
            "{:<6} {:<9} {:>10.4} {:>10} {:>10} {:>6}\n",
            row.symbol,
            row.stock_type.to_string(),
            row.volume_weighted_price,
            row.dividend_yield.map_or_else(dash, |v| format!("{v:.6}")),
            row.pe_ratio.map_or_else(dash, |v| format!("{v:.4}")),
            row.recent_trades
        ));
    }
    out.push_str(&format!("All Share Index: {:.4}\n", summary.all_share_index));
    out
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match build_stocks(&adapter) {
        Ok(stocks) => {
            for stock in &stocks {
                match stock.fixed_dividend() {
                    Some(fixed) => eprintln!("  {stock} fixed_dividend={fixed}"),
                    None => eprintln!("  {stock}"),
                }
            }
            eprintln!("\n{} stocks configured; configuration is valid.", stocks.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
