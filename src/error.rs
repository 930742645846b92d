use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // -- File and configuration errors
    #[error("Failed to open file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] config::ConfigError),

    #[error("Credentials file `{0}` not found in the working directory or under ~/.config/fish")]
    CredentialsNotFound(String),

    // -- Import parsing errors
    #[error("Failed to read TSV: {0}")]
    TsvError(#[from] csv::Error),

    #[error("Row {row}: missing required field `{field}`")]
    MalformedRow { row: usize, field: &'static str },

    #[error("Row {row}: amount `{raw}` is not a decimal number")]
    InvalidAmount { row: usize, raw: String },

    #[error("Row {row}: `{raw}` is not a valid date")]
    InvalidDate { row: usize, raw: String },

    #[error("No data rows found in {0}")]
    EmptyImport(String),

    // -- Remote API errors
    #[error("Connection error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    RemoteRejected { status: u16, message: String },

    #[error(transparent)]
    PartialSequence(#[from] crate::payment::linker::PartialSequenceError),

    // -- Command-level errors
    #[error("{failed} of {attempted} rows failed")]
    BatchFailed { failed: usize, attempted: usize },

    #[error("Failed to parse --lines JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid transaction ID `{0}`")]
    InvalidTransactionId(String),

    #[error("--account-id is required for the ledger report")]
    MissingAccountId,

    #[error("Aborted")]
    AbortError,
}

impl AppError {
    /// The 1-based input row a parsing error refers to, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            AppError::MalformedRow { row, .. }
            | AppError::InvalidAmount { row, .. }
            | AppError::InvalidDate { row, .. } => Some(*row),
            _ => None,
        }
    }
}
