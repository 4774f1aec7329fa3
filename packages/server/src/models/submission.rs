use chrono::{DateTime, Utc};
use common::SubmissionStatus;
use serde::{Deserialize, Serialize};

use crate::entity::submission;
use crate::error::AppError;

use super::hackathon::parse_hackathon_id;

/// Project name stored when the submitter leaves it out.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled";

/// Request body for submitting a project.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSubmissionRequest {
    /// Target hackathon, as a number or a numeric string.
    #[serde(default)]
    #[schema(value_type = Object, example = 1)]
    pub hackathon_id: serde_json::Value,
    #[schema(example = "Rocket")]
    pub project_name: Option<String>,
    /// Link to the code repository. `github_link` is accepted as an alias.
    #[serde(default, alias = "github_link")]
    #[schema(example = "https://github.com/acme/rocket")]
    pub repository_link: Option<String>,
    #[serde(default)]
    #[schema(example = "https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    pub video_link: Option<String>,
}

/// Query parameters for listing a hackathon's submissions.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct SubmissionListQuery {
    /// Only return submissions with this status.
    pub status: Option<SubmissionStatus>,
}

/// Full submission record.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub hackathon_id: i32,
    #[schema(example = "Rocket")]
    pub project_name: String,
    #[schema(example = "https://github.com/acme/rocket")]
    pub repository_link: String,
    #[schema(example = "https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    pub video_link: String,
    pub status: SubmissionStatus,
    /// Null until a verdict is recorded.
    #[schema(example = 8.5)]
    pub score_innovation: Option<f64>,
    /// Null until a verdict is recorded.
    #[schema(example = 9.2)]
    pub score_impact: Option<f64>,
    #[schema(example = "Solid execution")]
    pub justification: Option<String>,
    #[schema(example = "2026-04-01T09:30:00Z")]
    pub created_at: DateTime<Utc>,
}

impl From<submission::Model> for SubmissionResponse {
    fn from(m: submission::Model) -> Self {
        Self {
            id: m.id,
            hackathon_id: m.hackathon_id,
            project_name: m.project_name,
            repository_link: m.repository_link,
            video_link: m.video_link,
            status: m.status,
            score_innovation: m.score_innovation,
            score_impact: m.score_impact,
            justification: m.justification,
            created_at: m.created_at,
        }
    }
}

/// Validated intake fields. The hackathon itself is resolved by the handler.
#[derive(Debug, PartialEq, Eq)]
pub struct NewSubmission {
    pub hackathon_id: i32,
    pub project_name: String,
    pub repository_link: String,
    pub video_link: String,
}

/// Validate a submission intake request. Nothing is persisted before this passes.
pub fn validate_create_submission(req: CreateSubmissionRequest) -> Result<NewSubmission, AppError> {
    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

    let mut missing = Vec::new();
    if req.hackathon_id.is_null() {
        missing.push("hackathon_id");
    }
    if !present(&req.repository_link) {
        missing.push("repository_link");
    }
    if !present(&req.video_link) {
        missing.push("video_link");
    }
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let hackathon_id = parse_hackathon_id(&req.hackathon_id)
        .ok_or_else(|| AppError::Validation("Invalid Hackathon ID format".into()))?;

    let project_name = req
        .project_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());

    Ok(NewSubmission {
        hackathon_id,
        project_name,
        repository_link: req.repository_link.unwrap_or_default().trim().to_string(),
        video_link: req.video_link.unwrap_or_default().trim().to_string(),
    })
}
