//! Report generation port trait.

use crate::domain::error::GbceError;
use crate::domain::summary::MarketSummary;

/// Port for writing market summary reports.
pub trait ReportPort {
    fn write(&self, summary: &MarketSummary, output_path: &str) -> Result<(), GbceError>;
}
