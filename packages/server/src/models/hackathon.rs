use chrono::{DateTime, Utc};
use evaluator::prompt::DEFAULT_CRITERIA;
use serde::{Deserialize, Serialize};

use crate::entity::hackathon;
use crate::error::AppError;

/// Request body for creating a hackathon.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateHackathonRequest {
    #[serde(default)]
    #[schema(example = "Spring Hack 2026")]
    pub name: String,
    /// Opaque key identifying the judge who owns the hackathon.
    #[serde(default)]
    #[schema(example = "judge_2f1c")]
    pub judge_id: String,
    /// Judging rubric. Defaults to a generic innovation/impact rubric when omitted.
    #[schema(example = "Reward technical depth and real-world usefulness.")]
    pub criteria: Option<String>,
}

/// Query parameters for listing a judge's hackathons.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct HackathonListQuery {
    /// Owner key of the judge. Required.
    #[param(example = "judge_2f1c")]
    pub judge_id: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HackathonResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Spring Hack 2026")]
    pub name: String,
    #[schema(example = "judge_2f1c")]
    pub judge_id: String,
    pub criteria: Option<String>,
    #[schema(example = "2026-04-01T09:00:00Z")]
    pub created_at: DateTime<Utc>,
}

impl From<hackathon::Model> for HackathonResponse {
    fn from(m: hackathon::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            judge_id: m.judge_id,
            criteria: m.criteria,
            created_at: m.created_at,
        }
    }
}

/// Request body for checking that a hackathon ID exists.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct VerifyHackathonRequest {
    /// Hackathon ID, as a number or a numeric string.
    #[serde(default)]
    #[schema(value_type = Object, example = 1)]
    pub hackathon_id: serde_json::Value,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct VerifyHackathonResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Spring Hack 2026")]
    pub hackathon_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VerifyHackathonResponse {
    pub fn valid(name: String) -> Self {
        Self {
            valid: true,
            hackathon_name: Some(name),
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            hackathon_name: None,
            message: Some(message.into()),
        }
    }
}

/// Validated fields of a hackathon creation request.
pub struct NewHackathon {
    pub name: String,
    pub judge_id: String,
    pub criteria: String,
}

pub fn validate_create_hackathon(req: CreateHackathonRequest) -> Result<NewHackathon, AppError> {
    let name = req.name.trim();
    let judge_id = req.judge_id.trim();
    if name.is_empty() || judge_id.is_empty() {
        return Err(AppError::Validation("Missing name or judge_id".into()));
    }
    if name.chars().count() > 100 {
        return Err(AppError::Validation("Name must be at most 100 characters".into()));
    }

    Ok(NewHackathon {
        name: name.to_string(),
        judge_id: judge_id.to_string(),
        criteria: req.criteria.unwrap_or_else(|| DEFAULT_CRITERIA.to_string()),
    })
}

/// Accept an integer or a numeric string, the way form clients send IDs.
pub fn parse_hackathon_id(value: &serde_json::Value) -> Option<i32> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
