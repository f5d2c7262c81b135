//! Stocks, their trade history, and per-stock metrics.
//!
//! Dividend yield:  Common = last_dividend / price
//!                  Preferred = (fixed_dividend * par_value) / price
//! P/E ratio:       price / dividend basis, undefined when the basis is zero
//! VWAP:            sum(price * quantity) / sum(quantity) over trailing minutes

use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::str::FromStr;

use super::error::GbceError;
use super::trade::{Trade, TradeIndicator};

pub const DEFAULT_VWAP_WINDOW_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockType {
    Common,
    Preferred,
}

impl fmt::Display for StockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockType::Common => write!(f, "Common"),
            StockType::Preferred => write!(f, "Preferred"),
        }
    }
}

impl FromStr for StockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "common" => Ok(StockType::Common),
            "preferred" => Ok(StockType::Preferred),
            other => Err(format!("unknown stock type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    symbol: String,
    stock_type: StockType,
    last_dividend: u64,
    fixed_dividend: Option<f64>,
    par_value: u64,
    trades: Vec<Trade>,
}

impl Stock {
    /// `fixed_dividend` is a fraction (0.02 for 2%) and only meaningful for
    /// preferred stock. Dividends and par value are in pennies.
    pub fn new(
        symbol: impl Into<String>,
        stock_type: StockType,
        last_dividend: u64,
        fixed_dividend: Option<f64>,
        par_value: u64,
    ) -> Self {
        Stock {
            symbol: symbol.into(),
            stock_type,
            last_dividend,
            fixed_dividend,
            par_value,
            trades: Vec::new(),
        }
    }

    pub fn common(symbol: impl Into<String>, last_dividend: u64, par_value: u64) -> Self {
        Self::new(symbol, StockType::Common, last_dividend, None, par_value)
    }

    pub fn preferred(
        symbol: impl Into<String>,
        last_dividend: u64,
        fixed_dividend: f64,
        par_value: u64,
    ) -> Self {
        Self::new(
            symbol,
            StockType::Preferred,
            last_dividend,
            Some(fixed_dividend),
            par_value,
        )
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn stock_type(&self) -> StockType {
        self.stock_type
    }

    pub fn last_dividend(&self) -> u64 {
        self.last_dividend
    }

    pub fn fixed_dividend(&self) -> Option<f64> {
        self.fixed_dividend
    }

    pub fn par_value(&self) -> u64 {
        self.par_value
    }

    /// All recorded trades, oldest first.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    fn fixed_dividend_amount(&self) -> Result<f64, GbceError> {
        self.fixed_dividend
            .map(|rate| rate * self.par_value as f64)
            .ok_or_else(|| GbceError::MissingFixedDividend {
                symbol: self.symbol.clone(),
            })
    }

    fn dividend_basis(&self) -> Result<f64, GbceError> {
        match self.stock_type {
            StockType::Common => Ok(self.last_dividend as f64),
            StockType::Preferred => self.fixed_dividend_amount(),
        }
    }

    pub fn calculate_dividend_yield(&self, price: f64) -> Result<f64, GbceError> {
        if !is_valid_price(price) {
            return Err(GbceError::InvalidPrice { price });
        }
        Ok(self.dividend_basis()? / price)
    }

    /// Returns `Ok(None)` when the stock pays no dividend. The price is not
    /// range checked.
    pub fn calculate_pe_ratio(&self, price: f64) -> Result<Option<f64>, GbceError> {
        let dividend = self.dividend_basis()?;
        if dividend == 0.0 {
            return Ok(None);
        }
        Ok(Some(price / dividend))
    }

    pub fn record_trade(
        &mut self,
        quantity: i64,
        indicator: TradeIndicator,
        price: f64,
        now: DateTime<Utc>,
    ) -> Result<(), GbceError> {
        if quantity <= 0 {
            return Err(GbceError::InvalidQuantity { quantity });
        }
        if !is_valid_price(price) {
            return Err(GbceError::InvalidPrice { price });
        }

        let trade = Trade::new(self.symbol.clone(), quantity, indicator, price, now);
        log::debug!("recorded {trade} at {now}");
        self.trades.push(trade);
        Ok(())
    }

    /// Trades at or after `now - minutes`.
    pub fn recent_trades(
        &self,
        minutes: u32,
        now: DateTime<Utc>,
    ) -> impl Iterator<Item = &Trade> + '_ {
        let cutoff = now - TimeDelta::minutes(i64::from(minutes));
        self.trades.iter().filter(move |t| t.timestamp() >= cutoff)
    }

    /// Volume weighted price over the trailing `minutes`. Returns 0.0 when no
    /// trades fall inside the window.
    ///
    /// Quantities are totalled as `f64` so large windows cannot overflow.
    pub fn calculate_volume_weighted_price(&self, minutes: u32, now: DateTime<Utc>) -> f64 {
        let (total_value, total_quantity) = self
            .recent_trades(minutes, now)
            .fold((0.0_f64, 0.0_f64), |(value, quantity), trade| {
                (value + trade.value(), quantity + trade.quantity() as f64)
            });

        if total_quantity == 0.0 {
            return 0.0;
        }
        total_value / total_quantity
    }
}

/// Finite and strictly positive; NaN fails both checks.
fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stock(symbol='{}', type={}, last_dividend={})",
            self.symbol, self.stock_type, self.last_dividend
        )
    }
}
