#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a project submission during AI evaluation.
///
/// A submission is created as `Processing` and moves to exactly one terminal
/// status in a single write. When the `sea-orm` feature is enabled, this enum
/// can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    /// Evidence gathering and model evaluation in progress.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "PROCESSING"))]
    Processing,
    /// The model accepted the project.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "AI_ACCEPTED"))]
    AiAccepted,
    /// The model rejected the project.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "AI_REJECTED"))]
    AiRejected,
    /// Verdict parsed but the decision was missing or unrecognized.
    /// Needs a human to decide.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "AI_PENDING"))]
    AiPending,
    /// The model answered, but no verdict could be extracted.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "AI_ERROR"))]
    AiError,
    /// An evidence service was unreachable or answered with a failure.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "SERVICE_ERROR"))]
    ServiceError,
    /// Any other failure, including the model call itself.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "SYSTEM_ERROR"))]
    SystemError,
}

impl SubmissionStatus {
    /// Returns true if evaluation is complete and the record is no longer mutated.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Processing)
    }

    /// Returns true if the model produced a usable verdict (scores are set).
    pub fn has_verdict(&self) -> bool {
        matches!(self, Self::AiAccepted | Self::AiRejected | Self::AiPending)
    }

    /// Returns true if the pipeline failed before a verdict was produced.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::AiError | Self::ServiceError | Self::SystemError)
    }

    /// All possible status values.
    pub const ALL: &'static [SubmissionStatus] = &[
        Self::Processing,
        Self::AiAccepted,
        Self::AiRejected,
        Self::AiPending,
        Self::AiError,
        Self::ServiceError,
        Self::SystemError,
    ];

    /// All terminal statuses.
    pub const TERMINAL: &'static [SubmissionStatus] = &[
        Self::AiAccepted,
        Self::AiRejected,
        Self::AiPending,
        Self::AiError,
        Self::ServiceError,
        Self::SystemError,
    ];

    /// Returns the string representation (SCREAMING_SNAKE_CASE).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "PROCESSING",
            Self::AiAccepted => "AI_ACCEPTED",
            Self::AiRejected => "AI_REJECTED",
            Self::AiPending => "AI_PENDING",
            Self::AiError => "AI_ERROR",
            Self::ServiceError => "SERVICE_ERROR",
            Self::SystemError => "SYSTEM_ERROR",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::Processing
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    invalid: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid status '{}'. Valid values: {}",
            self.invalid,
            SubmissionStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for SubmissionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubmissionStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError {
                invalid: s.to_string(),
            })
    }
}
