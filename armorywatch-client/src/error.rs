//! Error types for the API client.

use thiserror::Error;

/// Errors surfaced by the API client.
///
/// Most transport problems never reach callers - the gateway degrades them
/// to [`Payload::Empty`](crate::Payload) so extractors stay branch-free.
/// What does surface is the small set of failures that should stop a poll
/// cycle (or abort setup) rather than silently zero out metrics.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The token exchange was rejected (bad credentials, revoked client).
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse a response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Connection failed, or a validation fetch came back empty.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for a response.
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Connection(err.to_string())
        } else {
            ClientError::Http(err.to_string())
        }
    }
}
