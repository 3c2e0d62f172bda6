// src/error.rs
// Standardized error types for the OpenProject client

use thiserror::Error;

/// Errors surfaced by every remote operation.
///
/// `Request` and `Decode` carry an operation context string naming the call
/// and its identifying parameters, so the failure is diagnosable at the tool
/// boundary without a stack trace.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{context}: server returned {status}: {body}")]
    Request {
        context: String,
        status: u16,
        body: String,
    },

    #[error("{context}: could not decode response: {detail}")]
    Decode { context: String, detail: String },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Result using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
