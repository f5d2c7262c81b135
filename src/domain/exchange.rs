//! Stock registry and the all share index.

use std::collections::HashMap;

use super::error::GbceError;
use super::stock::{DEFAULT_VWAP_WINDOW_MINUTES, Stock};
use super::trade::TradeIndicator;
use crate::ports::clock_port::ClockPort;

/// Stocks keyed by symbol, in registration order.
///
/// The exchange owns its stocks outright and reads "now" from the injected
/// clock whenever a trade is recorded or a VWAP window is evaluated.
#[derive(Debug)]
pub struct Exchange<C: ClockPort> {
    clock: C,
    stocks: Vec<Stock>,
    positions: HashMap<String, usize>,
    window_minutes: u32,
}

impl<C: ClockPort> Exchange<C> {
    pub fn new(clock: C) -> Self {
        Exchange {
            clock,
            stocks: Vec::new(),
            positions: HashMap::new(),
            window_minutes: DEFAULT_VWAP_WINDOW_MINUTES,
        }
    }

    /// Sets the VWAP window used by the all share index.
    pub fn with_window(mut self, minutes: u32) -> Self {
        self.window_minutes = minutes;
        self
    }

    pub fn window_minutes(&self) -> u32 {
        self.window_minutes
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Registers a stock. An existing stock with the same symbol is replaced
    /// along with its trade history, keeping its registration slot.
    pub fn add_stock(&mut self, stock: Stock) {
        match self.positions.get(stock.symbol()) {
            Some(&i) => {
                log::debug!(
                    "replacing {} ({} trades discarded)",
                    stock.symbol(),
                    self.stocks[i].trades().len()
                );
                self.stocks[i] = stock;
            }
            None => {
                log::debug!("registered {stock}");
                self.positions
                    .insert(stock.symbol().to_string(), self.stocks.len());
                self.stocks.push(stock);
            }
        }
    }

    pub fn get_stock(&self, symbol: &str) -> Result<&Stock, GbceError> {
        self.positions
            .get(symbol)
            .map(|&i| &self.stocks[i])
            .ok_or_else(|| GbceError::StockNotFound {
                symbol: symbol.to_string(),
            })
    }

    pub fn get_stock_mut(&mut self, symbol: &str) -> Result<&mut Stock, GbceError> {
        match self.positions.get(symbol) {
            Some(&i) => Ok(&mut self.stocks[i]),
            None => Err(GbceError::StockNotFound {
                symbol: symbol.to_string(),
            }),
        }
    }

    pub fn get_all_stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn record_trade(
        &mut self,
        symbol: &str,
        quantity: i64,
        indicator: TradeIndicator,
        price: f64,
    ) -> Result<(), GbceError> {
        let now = self.clock.now();
        self.get_stock_mut(symbol)?
            .record_trade(quantity, indicator, price, now)
    }

    /// VWAP of one stock over the exchange window, as of the clock's now.
    pub fn calculate_volume_weighted_price(&self, symbol: &str) -> Result<f64, GbceError> {
        let stock = self.get_stock(symbol)?;
        Ok(stock.calculate_volume_weighted_price(self.window_minutes, self.clock.now()))
    }

    /// Geometric mean of every stock's VWAP. Stocks with a VWAP of 0.0 count
    /// as untraded and are left out; with none left the index is 0.0.
    pub fn calculate_all_share_index(&self) -> f64 {
        let now = self.clock.now();
        let prices: Vec<f64> = self
            .stocks
            .iter()
            .map(|s| s.calculate_volume_weighted_price(self.window_minutes, now))
            .filter(|&p| p > 0.0)
            .collect();
        geometric_mean(&prices)
    }
}

/// exp(mean(ln x)), which stays finite where the raw product would overflow.
/// Expects strictly positive values; an empty slice yields 0.0.
pub fn geometric_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    (log_sum / values.len() as f64).exp()
}
