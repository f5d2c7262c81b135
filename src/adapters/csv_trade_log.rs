//! CSV trade log adapter.
//!
//! Expected columns: `timestamp,symbol,quantity,indicator,price` with RFC 3339
//! timestamps. Values are parsed but not range checked; recording the trade on
//! its stock does that.

use crate::domain::error::GbceError;
use crate::domain::trade::TradeIndicator;
use crate::ports::trade_log_port::{TradeEntry, TradeLogPort};
use chrono::{DateTime, Utc};
use csv::StringRecord;
use std::path::PathBuf;

pub struct CsvTradeLog {
    path: PathBuf,
}

impl CsvTradeLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn parse(content: &str) -> Result<Vec<TradeEntry>, GbceError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut entries = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| GbceError::TradeLog {
                reason: format!("CSV parse error: {}", e),
            })?;
            // Header is line 1.
            entries.push(parse_record(&record, i + 2)?);
        }

        entries.sort_by_key(|e| e.timestamp);
        Ok(entries)
    }
}

fn field<'r>(
    record: &'r StringRecord,
    index: usize,
    name: &str,
    line: usize,
) -> Result<&'r str, GbceError> {
    record.get(index).ok_or_else(|| GbceError::TradeLog {
        reason: format!("line {line}: missing {name} column"),
    })
}

fn parse_record(record: &StringRecord, line: usize) -> Result<TradeEntry, GbceError> {
    let bad = |name: &str, e: &dyn std::fmt::Display| GbceError::TradeLog {
        reason: format!("line {line}: invalid {name}: {e}"),
    };

    let timestamp = DateTime::parse_from_rfc3339(field(record, 0, "timestamp", line)?)
        .map_err(|e| bad("timestamp", &e))?
        .with_timezone(&Utc);

    let symbol = field(record, 1, "symbol", line)?.to_uppercase();
    if symbol.is_empty() {
        return Err(GbceError::TradeLog {
            reason: format!("line {line}: empty symbol"),
        });
    }

    let quantity = field(record, 2, "quantity", line)?
        .parse::<i64>()
        .map_err(|e| bad("quantity", &e))?;
    let indicator = field(record, 3, "indicator", line)?
        .parse::<TradeIndicator>()
        .map_err(|e| bad("indicator", &e))?;
    let price = field(record, 4, "price", line)?
        .parse::<f64>()
        .map_err(|e| bad("price", &e))?;

    Ok(TradeEntry {
        timestamp,
        symbol,
        quantity,
        indicator,
        price,
    })
}

impl TradeLogPort for CsvTradeLog {
    fn load_trades(&self) -> Result<Vec<TradeEntry>, GbceError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| GbceError::TradeLog {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        Self::parse(&content)
    }
}
