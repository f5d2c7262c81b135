//! Core domain types and logic.

pub mod config_validation;
pub mod error;
pub mod exchange;
pub mod sample;
pub mod stock;
pub mod summary;
pub mod trade;
