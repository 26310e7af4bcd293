//! Record API error types.

/// Errors that can occur when fetching stop or route records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No record exists for the requested id
    #[error("record not found: {0}")]
    NotFound(String),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RecordError::NotFound("490008660N".into());
        assert_eq!(err.to_string(), "record not found: 490008660N");

        let err = RecordError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");
    }
}
