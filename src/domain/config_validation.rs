//! Configuration validation.
//!
//! Checks the `[exchange]` section and every stock section it lists before
//! any stock is built from them.

use std::collections::HashSet;

use crate::domain::error::GbceError;
use crate::domain::stock::StockType;
use crate::ports::config_port::ConfigPort;

pub const EXCHANGE_SECTION: &str = "exchange";

pub fn validate_exchange_config(config: &dyn ConfigPort) -> Result<(), GbceError> {
    validate_window(config)?;
    for symbol in listed_symbols(config)? {
        validate_stock(config, &symbol)?;
    }
    Ok(())
}

/// Symbols named by `[exchange] stocks`, upper-cased, in file order.
pub fn listed_symbols(config: &dyn ConfigPort) -> Result<Vec<String>, GbceError> {
    let raw = config
        .get_string(EXCHANGE_SECTION, "stocks")
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| GbceError::ConfigMissing {
            section: EXCHANGE_SECTION.to_string(),
            key: "stocks".to_string(),
        })?;
    parse_symbols(&raw).map_err(|reason| GbceError::ConfigInvalid {
        section: EXCHANGE_SECTION.to_string(),
        key: "stocks".to_string(),
        reason,
    })
}

pub fn parse_symbols(input: &str) -> Result<Vec<String>, String> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err("empty symbol in stock list".to_string());
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(format!("duplicate symbol {symbol}"));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), GbceError> {
    let window = config
        .get_int(EXCHANGE_SECTION, "window_minutes")
        .map_err(|reason| invalid(EXCHANGE_SECTION, "window_minutes", &reason))?;
    match window {
        Some(v) if v < 1 => Err(invalid(
            EXCHANGE_SECTION,
            "window_minutes",
            "window_minutes must be at least 1",
        )),
        Some(v) if v > i64::from(u32::MAX) => Err(invalid(
            EXCHANGE_SECTION,
            "window_minutes",
            &format!("window_minutes must be at most {}", u32::MAX),
        )),
        _ => Ok(()),
    }
}

fn validate_stock(config: &dyn ConfigPort, symbol: &str) -> Result<(), GbceError> {
    if !config.has_section(symbol) {
        return Err(GbceError::ConfigInvalid {
            section: EXCHANGE_SECTION.to_string(),
            key: "stocks".to_string(),
            reason: format!("no [{symbol}] section"),
        });
    }

    let kind = stock_type(config, symbol)?;

    let last_dividend = required_int(config, symbol, "last_dividend")?;
    if last_dividend < 0 {
        return Err(invalid(symbol, "last_dividend", "last_dividend must be non-negative"));
    }

    let par_value = required_int(config, symbol, "par_value")?;
    if par_value <= 0 {
        return Err(invalid(symbol, "par_value", "par_value must be positive"));
    }

    if kind == StockType::Preferred {
        let fixed = config
            .get_double(symbol, "fixed_dividend")
            .map_err(|reason| invalid(symbol, "fixed_dividend", &reason))?;
        match fixed {
            None => {
                return Err(GbceError::ConfigMissing {
                    section: symbol.to_string(),
                    key: "fixed_dividend".to_string(),
                });
            }
            Some(v) if !(v > 0.0) => {
                return Err(invalid(
                    symbol,
                    "fixed_dividend",
                    "fixed_dividend must be positive",
                ));
            }
            Some(_) => {}
        }
    }

    Ok(())
}

/// Parsed `type` of a stock section.
pub fn stock_type(config: &dyn ConfigPort, symbol: &str) -> Result<StockType, GbceError> {
    config
        .get_string(symbol, "type")
        .ok_or_else(|| GbceError::ConfigMissing {
            section: symbol.to_string(),
            key: "type".to_string(),
        })?
        .parse::<StockType>()
        .map_err(|reason| invalid(symbol, "type", &reason))
}

pub fn required_int(config: &dyn ConfigPort, section: &str, key: &str) -> Result<i64, GbceError> {
    config
        .get_int(section, key)
        .map_err(|reason| invalid(section, key, &reason))?
        .ok_or_else(|| GbceError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        })
}

fn invalid(section: &str, key: &str, reason: &str) -> GbceError {
    GbceError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
