use thiserror::Error;

/// Application-wide error types for garimpo.
///
/// Most failures in this system are recovered locally (a failed source or a
/// skipped record never aborts a run); these variants exist for the places
/// where an error does cross a boundary — repositories, binaries and the
/// HTTP error mapper.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed (fetching a page or API endpoint).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// LLM API call failed.
    #[error("LLM error (HTTP {status_code}): {message}")]
    LlmError { message: String, status_code: u16 },

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Invalid or missing configuration (e.g. a search run with no keywords).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}
