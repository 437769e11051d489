//! Error types for outbound requests and the services built on them.

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

/// Errors raised by a [`DocumentStore`](crate::docstore::DocumentStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport or HTTP status failure.
    #[error("Document store request failed: {0}")]
    Fetch(#[from] FetchError),

    /// A document or value did not match the expected wire format.
    #[error("Malformed document: {0}")]
    Decode(String),

    /// The store is misconfigured (missing project, bad base URL).
    #[error("Invalid document store configuration: {0}")]
    Config(String),

    /// The store refused the operation.
    #[error("Document store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by an [`EmailRelay`](crate::relay::EmailRelay).
#[derive(Error, Debug)]
pub enum RelayError {
    /// Transport or HTTP status failure.
    #[error("Email relay request failed: {0}")]
    Fetch(#[from] FetchError),

    /// The message could not be encoded.
    #[error("Failed to encode relay message: {0}")]
    Encode(String),

    /// The relay is misconfigured.
    #[error("Invalid email relay configuration: {0}")]
    Config(String),

    /// The relay refused the message.
    #[error("Email relay unavailable: {0}")]
    Unavailable(String),
}
