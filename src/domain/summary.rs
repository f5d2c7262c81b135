//! Point-in-time market summary across all stocks.

use chrono::{DateTime, Utc};

use super::error::GbceError;
use super::exchange::Exchange;
use super::stock::StockType;
use crate::ports::clock_port::ClockPort;

#[derive(Debug, Clone, PartialEq)]
pub struct StockSummary {
    pub symbol: String,
    pub stock_type: StockType,
    pub volume_weighted_price: f64,
    /// Evaluated at the VWAP; `None` when the stock has no recent trades.
    pub dividend_yield: Option<f64>,
    /// Evaluated at the VWAP; `None` without recent trades or without a dividend.
    pub pe_ratio: Option<f64>,
    pub recent_trades: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketSummary {
    pub as_of: DateTime<Utc>,
    pub window_minutes: u32,
    pub stocks: Vec<StockSummary>,
    pub all_share_index: f64,
}

impl MarketSummary {
    pub fn compute<C: ClockPort>(exchange: &Exchange<C>) -> Result<Self, GbceError> {
        let as_of = exchange.clock().now();
        let window = exchange.window_minutes();

        let mut stocks = Vec::with_capacity(exchange.len());
        for stock in exchange.get_all_stocks() {
            let vwap = stock.calculate_volume_weighted_price(window, as_of);
            let (dividend_yield, pe_ratio) = if vwap > 0.0 {
                (
                    Some(stock.calculate_dividend_yield(vwap)?),
                    stock.calculate_pe_ratio(vwap)?,
                )
            } else {
                (None, None)
            };

            stocks.push(StockSummary {
                symbol: stock.symbol().to_string(),
                stock_type: stock.stock_type(),
                volume_weighted_price: vwap,
                dividend_yield,
                pe_ratio,
                recent_trades: stock.recent_trades(window, as_of).count(),
            });
        }

        Ok(MarketSummary {
            as_of,
            window_minutes: window,
            stocks,
            all_share_index: exchange.calculate_all_share_index(),
        })
    }

    pub fn traded_count(&self) -> usize {
        self.stocks.iter().filter(|s| s.recent_trades > 0).count()
    }
}
