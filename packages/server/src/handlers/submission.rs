use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::SubmissionStatus;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::submission;
use crate::error::{AppError, ErrorBody};
use crate::evaluation::EvaluationService;
use crate::extractors::json::AppJson;
use crate::handlers::hackathon::find_hackathon;
use crate::models::submission::*;
use crate::state::AppState;

/// Submit a project and evaluate it synchronously.
#[utoipa::path(
    post,
    path = "/",
    tag = "Submissions",
    operation_id = "createSubmission",
    summary = "Submit a project for AI judging",
    description = "Validates the request, records the submission as `PROCESSING`, then gathers repository and video evidence, asks the model for a verdict and stores the terminal status before answering. AI outcomes (`AI_ACCEPTED`, `AI_REJECTED`, `AI_PENDING`, `AI_ERROR`) return 201. `SERVICE_ERROR` and `SYSTEM_ERROR` return an error body carrying the `submission_id`; the stored record explains the failure.",
    request_body = CreateSubmissionRequest,
    responses(
        (status = 201, description = "Submission evaluated", body = SubmissionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Hackathon not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Model call failed (SYSTEM_ERROR)", body = ErrorBody),
        (status = 502, description = "Evidence service failed (SERVICE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_submission(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new = validate_create_submission(payload)?;
    let hackathon = find_hackathon(&state.db, new.hackathon_id).await?;

    let model = submission::ActiveModel {
        hackathon_id: Set(hackathon.id),
        project_name: Set(new.project_name),
        repository_link: Set(new.repository_link),
        video_link: Set(new.video_link),
        status: Set(SubmissionStatus::Processing),
        score_innovation: Set(None),
        score_impact: Set(None),
        justification: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    info!(submission_id = model.id, hackathon_id = hackathon.id, "Submission recorded");

    let evaluated = EvaluationService::new(&state.db)
        .evaluate_detached(state.evaluator.clone(), model, hackathon)
        .await?;

    match evaluated.status {
        status @ (SubmissionStatus::ServiceError | SubmissionStatus::SystemError) => {
            Err(AppError::EvaluationFailed {
                submission_id: evaluated.id,
                status,
                message: evaluated.justification.unwrap_or_default(),
            })
        }
        _ => Ok((StatusCode::CREATED, Json(SubmissionResponse::from(evaluated)))),
    }
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Submissions",
    operation_id = "getSubmission",
    summary = "Get a submission",
    description = "Returns the stored record, including failure submissions.",
    params(
        ("id" = i32, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission details", body = SubmissionResponse),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(submission_id = %id))]
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let sub = submission::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))?;

    Ok(Json(SubmissionResponse::from(sub)))
}
