//! Error types for the page-cited Q&A pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (e.g. chunk overlap >= chunk size)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed document (missing `sections`, bad structure)
    #[error("Invalid document '{name}': {message}")]
    Document { name: String, message: String },

    /// Document or page range contains no usable text
    #[error("No content: {0}")]
    NoContent(String),

    /// PDF extraction error
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    /// LLM request failed (transport, HTTP status, empty response)
    #[error("LLM error: {0}")]
    Llm(String),

    /// LLM responded, but the output was not in the expected shape
    #[error("Malformed LLM output: {0}")]
    LlmOutput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a document error
    pub fn document(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Document {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create a malformed-output error
    pub fn llm_output(message: impl Into<String>) -> Self {
        Self::LlmOutput(message.into())
    }

    /// Create a PDF error
    pub fn pdf(message: impl Into<String>) -> Self {
        Self::Pdf(message.into())
    }
}
