//! Executed trade records.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeIndicator {
    Buy,
    Sell,
}

impl fmt::Display for TradeIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeIndicator::Buy => write!(f, "BUY"),
            TradeIndicator::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for TradeIndicator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(TradeIndicator::Buy),
            "SELL" => Ok(TradeIndicator::Sell),
            other => Err(format!("unknown trade indicator '{other}'")),
        }
    }
}

/// One executed transaction. Prices are in pennies.
///
/// Trades carry the symbol of their stock rather than a reference to it, and
/// are never validated here; `Stock::record_trade` checks inputs before
/// building one.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    stock_symbol: String,
    quantity: i64,
    indicator: TradeIndicator,
    price: f64,
    timestamp: DateTime<Utc>,
}

impl Trade {
    pub(crate) fn new(
        stock_symbol: impl Into<String>,
        quantity: i64,
        indicator: TradeIndicator,
        price: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Trade {
            stock_symbol: stock_symbol.into(),
            quantity,
            indicator,
            price,
            timestamp,
        }
    }

    pub fn stock_symbol(&self) -> &str {
        &self.stock_symbol
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn indicator(&self) -> TradeIndicator {
        self.indicator
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Price times quantity.
    pub fn value(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trade(stock='{}', quantity={}, indicator={}, price={})",
            self.stock_symbol, self.quantity, self.indicator, self.price
        )
    }
}
