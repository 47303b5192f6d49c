//! Error types for dashlight.
//!
//! Each variant's display string is the exact client-facing message; the HTTP
//! layer maps variants to status codes without rewriting the text.

use thiserror::Error;

/// Result type alias using dashlight's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for dashlight operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Request carried neither an image nor any non-empty text.
    #[error("No text or image provided.")]
    NoInput,

    /// Magic-byte sniffing could not classify the upload at all.
    #[error("Could not determine file type.")]
    TypeDetection,

    /// Sniffing succeeded but the true type is not an image.
    /// Carries the detected MIME type for logging; the display string is
    /// fixed so the detected type never leaks to the client.
    #[error("Invalid file type. Only images are allowed.")]
    UnsupportedMediaType(String),

    /// The inference backend call failed (transport error or non-2xx).
    #[error("Gemini API error: {0}")]
    Backend(String),

    /// The backend call succeeded but yielded no extractable text.
    #[error("Gemini API did not return a text response.")]
    EmptyModelResponse,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Backend(e.to_string())
    }
}
