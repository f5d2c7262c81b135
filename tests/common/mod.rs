#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use gbce::adapters::manual_clock::ManualClock;
use gbce::domain::exchange::Exchange;
use gbce::domain::sample::sample_exchange;
use gbce::domain::trade::TradeIndicator;
use gbce::ports::trade_log_port::TradeEntry;
use std::io::Write;

pub const SAMPLE_INI: &str = r#"
[exchange]
stocks = TEA,POP,ALE,GIN,JOE
window_minutes = 5

[TEA]
type = common
last_dividend = 0
par_value = 100

[POP]
type = common
last_dividend = 8
par_value = 100

[ALE]
type = common
last_dividend = 23
par_value = 60

[GIN]
type = preferred
last_dividend = 8
fixed_dividend = 0.02
par_value = 100

[JOE]
type = common
last_dividend = 13
par_value = 250
"#;

pub fn market_open() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

pub fn minutes_after_open(minutes: i64) -> DateTime<Utc> {
    market_open() + TimeDelta::minutes(minutes)
}

pub fn sample_at_open() -> Exchange<ManualClock> {
    sample_exchange(ManualClock::new(market_open()))
}

pub fn entry(
    minutes: i64,
    symbol: &str,
    quantity: i64,
    indicator: TradeIndicator,
    price: f64,
) -> TradeEntry {
    TradeEntry {
        timestamp: minutes_after_open(minutes),
        symbol: symbol.to_string(),
        quantity,
        indicator,
        price,
    }
}

pub fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
