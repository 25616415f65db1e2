use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum IrError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// Logging in failed or the client has no credentials to log in with.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The members site kept answering with a non-data page after a fresh login.
    #[error("session expired and could not be renewed")]
    SessionExpired,

    /// The data received was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// A JSON payload failed to decode.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSV payload failed to decode.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Reading or writing the persisted session failed.
    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),

    /// An invalid date range was provided (start must not be after end).
    #[error("invalid date range: start must not be after end")]
    InvalidDates,
}
