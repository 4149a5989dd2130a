//! Error types for PriceLens.
//!
//! One enum covers every failure class in the pipeline. The AI collaborator
//! failures are split three ways (credential, quota, other) because callers
//! treat them differently: quota failures degrade to computed fallbacks, the
//! other two propagate.

use thiserror::Error;

/// Unified error type for PriceLens.
///
/// All fallible functions return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input rejected before it reaches the pipeline (empty or malformed dataset)
    #[error("Validation error: {0}")]
    Validation(String),

    /// No line of the source text matched the record grammar
    #[error("Extraction error: {0}")]
    ExtractionEmpty(String),

    /// The LLM provider rejected the credential
    #[error("LLM authentication error: {0}")]
    LlmAuth(String),

    /// The LLM provider reported exhausted quota or rate limiting
    #[error("LLM quota error: {0}")]
    LlmQuota(String),

    /// Any other LLM provider failure
    #[error("LLM error: {0}")]
    Llm(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// True when the collaborator signalled quota exhaustion or rate limiting.
    pub fn is_quota(&self) -> bool {
        matches!(self, AppError::LlmQuota(_))
    }

    /// True when the collaborator rejected the credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::LlmAuth(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
