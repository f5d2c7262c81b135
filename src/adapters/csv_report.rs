//! CSV market summary report.
//!
//! One row per stock followed by an `ALL_SHARE_INDEX` row. Undefined metrics
//! are written as empty fields.

use crate::domain::error::GbceError;
use crate::domain::summary::MarketSummary;
use crate::ports::report_port::ReportPort;

pub const INDEX_ROW_LABEL: &str = "ALL_SHARE_INDEX";

pub struct CsvReport;

impl CsvReport {
    pub fn render(summary: &MarketSummary) -> Result<String, GbceError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_rows(&mut wtr, summary)?;
        let bytes = wtr.into_inner().map_err(|e| GbceError::Report {
            reason: format!("failed to flush report: {}", e),
        })?;
        String::from_utf8(bytes).map_err(|e| GbceError::Report {
            reason: e.to_string(),
        })
    }
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{v:.precision$}"))
        .unwrap_or_default()
}

fn write_rows<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    summary: &MarketSummary,
) -> Result<(), GbceError> {
    let to_err = |e: csv::Error| GbceError::Report {
        reason: format!("CSV write error: {}", e),
    };

    wtr.write_record([
        "symbol",
        "type",
        "vwap",
        "dividend_yield",
        "pe_ratio",
        "trades",
    ])
    .map_err(to_err)?;

    for row in &summary.stocks {
        wtr.write_record([
            row.symbol.clone(),
            row.stock_type.to_string(),
            format!("{:.4}", row.volume_weighted_price),
            optional(row.dividend_yield, 6),
            optional(row.pe_ratio, 4),
            row.recent_trades.to_string(),
        ])
        .map_err(to_err)?;
    }

    wtr.write_record([
        INDEX_ROW_LABEL.to_string(),
        String::new(),
        format!("{:.4}", summary.all_share_index),
        String::new(),
        String::new(),
        summary.traded_count().to_string(),
    ])
    .map_err(to_err)?;

    wtr.flush()?;
    Ok(())
}

impl ReportPort for CsvReport {
    fn write(&self, summary: &MarketSummary, output_path: &str) -> Result<(), GbceError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| GbceError::Report {
            reason: format!("failed to create {}: {}", output_path, e),
        })?;
        write_rows(&mut wtr, summary)
    }
}
