//! Error types for MindBloom.

use std::time::Duration;

use crate::assessment::QuestionId;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Assessment error: {0}")]
    Assessment(#[from] AssessmentError),

    #[error("Session store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Generation backend errors.
///
/// These never reach the chat or analysis surface directly; the exchange
/// client turns them into fallback text at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Provider {provider} returned no text")]
    EmptyResponse { provider: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("Another exchange is still in flight")]
    Busy,
}

/// Questionnaire errors: validation failures and malformed catalogs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("Question {0} has not been answered")]
    Unanswered(QuestionId),

    #[error("Unknown question id {0}")]
    UnknownQuestion(QuestionId),

    #[error("Value {value} is not an option of question {question}")]
    InvalidOption { question: QuestionId, value: u32 },

    #[error("Question {question} must offer at least two options")]
    TooFewOptions { question: QuestionId },

    #[error("Question {question} repeats option value {value}")]
    DuplicateOption { question: QuestionId, value: u32 },

    #[error("Duplicate question id {0}")]
    DuplicateQuestion(QuestionId),

    #[error("Catalog has no questions")]
    EmptyCatalog,

    #[error("Assessment is already being submitted")]
    AlreadySubmitting,
}

/// Session storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
