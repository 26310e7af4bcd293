//! Departures fetch error types.

use super::convert::ConversionError;

/// Errors from fetching a departure board.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The departures endpoint returned an error status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON shape.
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        /// Leading excerpt of the offending body, for diagnosis.
        body: Option<String>,
    },

    /// Response decoded but carried invalid identifiers or timestamps.
    #[error("invalid board data: {0}")]
    Convert(#[from] ConversionError),
}

impl FetchError {
    /// Whether this failure means the response itself was malformed, as
    /// opposed to a transient transport or server problem. Malformed
    /// responses point at a contract break and are logged louder.
    pub fn is_malformed(&self) -> bool {
        matches!(self, FetchError::Json { .. } | FetchError::Convert(_))
    }
}
