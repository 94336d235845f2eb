//! Error types for the live ticker widget

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when fetching the ticker from a data source
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Non-2xx HTTP status
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The API returned an application-level error payload
    #[error("API error {code}: {message}")]
    ApiError { code: String, message: String },

    /// Response body could not be parsed into a ticker payload
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Every relay candidate in the rotation failed
    #[error("All relay mirrors failed: {0}")]
    Exhausted(String),
}

impl SourceError {
    /// Creates an ApiError from an error payload
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ApiError {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates an InvalidResponse error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Creates an Exhausted error
    pub fn exhausted(msg: impl Into<String>) -> Self {
        Self::Exhausted(msg.into())
    }
}

/// Errors that can occur when reading ticker state
#[derive(Debug, Error, Clone)]
pub enum TickerError {
    /// No snapshot has been stored yet (still loading or all fetches failed)
    #[error("Ticker data not available yet")]
    NotLoaded,

    /// Stored snapshot is too old
    #[error("Ticker data is stale (age: {age:?})")]
    Stale { age: Duration },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TickerError {
    /// Creates a Stale error
    pub fn stale(age: Duration) -> Self {
        Self::Stale { age }
    }

    /// Creates an Internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
