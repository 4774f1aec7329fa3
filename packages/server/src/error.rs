use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::SubmissionStatus;
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `SERVICE_ERROR`, `SYSTEM_ERROR`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Missing required fields: repository_link")]
    pub message: String,
    /// Present when the failure happened after the submission was recorded.
    /// The stored record carries the full status and justification.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 42)]
    pub submission_id: Option<i32>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    /// The submission was recorded, but its evaluation ended in `SERVICE_ERROR`
    /// or `SYSTEM_ERROR`.
    EvaluationFailed {
        submission_id: i32,
        status: SubmissionStatus,
        message: String,
    },
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                    submission_id: None,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                    submission_id: None,
                },
            ),
            AppError::EvaluationFailed {
                submission_id,
                status,
                message,
            } => {
                let code = if status == SubmissionStatus::ServiceError {
                    StatusCode::BAD_GATEWAY
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (
                    code,
                    ErrorBody {
                        code: status.as_str(),
                        message,
                        submission_id: Some(submission_id),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                        submission_id: None,
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}
