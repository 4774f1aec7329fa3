use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluatorError {
    /// An evidence service could not be reached or answered with a failure.
    #[error("{service} request failed: {message}")]
    ServiceCommunication {
        service: &'static str,
        message: String,
    },

    /// The model call itself failed.
    #[error("Model invocation failed: {0}")]
    AiInvocation(String),

    #[error("{stage} timed out after {}s", .limit.as_secs_f64())]
    Timeout {
        stage: &'static str,
        limit: Duration,
    },

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Reasons a model answer could not be turned into a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    #[error("No valid JSON found in AI response")]
    NoJsonObject,

    #[error("Invalid JSON in AI response: {0}")]
    InvalidJson(String),

    #[error("Field '{0}' is not a number")]
    NonNumericScore(&'static str),
}

pub type Result<T> = std::result::Result<T, EvaluatorError>;
