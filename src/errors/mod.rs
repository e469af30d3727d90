use thiserror::Error;

/// Every failure a utility can surface.
///
/// Fetch, connection and configuration errors end the run; the batch sweep
/// catches the same type per item and keeps going.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API Error ({status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("Database Error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Decode Error: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Validation Error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Output Error: {0}")]
    OutputError(#[from] std::io::Error),
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::ConfigError(format!("invalid URL: {}", err))
    }
}
