//! Oracle error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the generation oracle
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl OracleError {
    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, OracleError::RateLimited { .. })
    }

    /// Check if this error is worth retrying at the transport layer
    pub fn is_retryable(&self) -> bool {
        match self {
            OracleError::RateLimited { .. } => true,
            OracleError::Api { status, .. } => *status >= 500,
            OracleError::Network(_) => true,
            OracleError::InvalidResponse(_) => false,
        }
    }

    /// Get the retry duration if this is a rate limit error
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            OracleError::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}
