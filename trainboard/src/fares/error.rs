//! Fares API error types.

use super::convert::ConversionError;

/// Errors from the fares HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum FareError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by fares API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Response parsed but could not be converted to domain types
    #[error("bad response: {0}")]
    Conversion(#[from] ConversionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FareError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = FareError::Json {
            message: "expected value at line 1".into(),
        };
        assert!(err.to_string().contains("JSON parse error"));

        assert_eq!(
            FareError::Unauthorized.to_string(),
            "unauthorized (invalid API key)"
        );
    }
}
