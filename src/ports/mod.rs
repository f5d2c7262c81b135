//! Port traits (hexagonal architecture boundaries).

pub mod clock_port;
pub mod config_port;
pub mod report_port;
pub mod trade_log_port;
