//! Domain error types.

/// Top-level error type for gbce.
#[derive(Debug, thiserror::Error)]
pub enum GbceError {
    #[error("price must be positive, got {price}")]
    InvalidPrice { price: f64 },

    #[error("quantity must be positive, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    #[error("preferred stock {symbol} has no fixed dividend")]
    MissingFixedDividend { symbol: String },

    #[error("stock {symbol} not found")]
    StockNotFound { symbol: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("trade log error: {reason}")]
    TradeLog { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GbceError {
    /// Bad input to a calculation or to trade recording.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            GbceError::InvalidPrice { .. }
                | GbceError::InvalidQuantity { .. }
                | GbceError::MissingFixedDividend { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GbceError::StockNotFound { .. })
    }
}

impl From<&GbceError> for std::process::ExitCode {
    fn from(err: &GbceError) -> Self {
        let code: u8 = match err {
            GbceError::Io(_) => 1,
            GbceError::ConfigParse { .. }
            | GbceError::ConfigMissing { .. }
            | GbceError::ConfigInvalid { .. } => 2,
            GbceError::InvalidPrice { .. }
            | GbceError::InvalidQuantity { .. }
            | GbceError::MissingFixedDividend { .. } => 3,
            GbceError::StockNotFound { .. } => 4,
            GbceError::TradeLog { .. } | GbceError::Report { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
