//! Error types for NCEI API operations.

use thiserror::Error;

/// Errors that can occur during NCEI API operations.
#[derive(Debug, Error)]
pub enum NceiError {
    /// Configuration is missing or incomplete.
    #[error("NCEI configuration required: {0}")]
    ConfigMissing(String),

    /// Required request parameters are missing.
    #[error("Required parameters missing: {}", .0.join(", "))]
    MissingParams(Vec<String>),

    /// Request parameters not recognized by the endpoint.
    #[error("Invalid parameters found: {}", .0.join(", "))]
    UnknownParams(Vec<String>),

    /// Parameter values failed validation.
    #[error("Parameter errors: {}", .0.join("; "))]
    InvalidParams(Vec<String>),

    /// Entity not found. The service reports an unknown ID as an empty
    /// `200` body rather than a `404`.
    #[error("{endpoint} '{id}' not found")]
    NotFound { endpoint: &'static str, id: String },

    /// Endpoint name not recognized.
    #[error("Unknown endpoint '{0}'")]
    UnknownEndpoint(String),

    /// API request failed.
    #[error("NCEI API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Response cache I/O error.
    #[error("Cache error: {0}")]
    CacheError(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type alias for NCEI operations.
pub type Result<T> = core::result::Result<T, NceiError>;
