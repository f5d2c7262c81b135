//! Concrete adapter implementations for ports.

pub mod csv_report;
pub mod csv_trade_log;
pub mod file_config_adapter;
pub mod manual_clock;
pub mod system_clock;
