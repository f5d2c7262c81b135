//! Trade log source port.

use chrono::{DateTime, Utc};

use crate::domain::error::GbceError;
use crate::domain::trade::TradeIndicator;

/// A trade as read from an external log, before it is recorded on a stock.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeEntry {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub quantity: i64,
    pub indicator: TradeIndicator,
    pub price: f64,
}

pub trait TradeLogPort {
    /// Entries ordered by timestamp, oldest first.
    fn load_trades(&self) -> Result<Vec<TradeEntry>, GbceError>;
}
