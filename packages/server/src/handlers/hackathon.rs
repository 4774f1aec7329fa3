use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{hackathon, submission};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::{AppJson, AppQuery};
use crate::models::hackathon::*;
use crate::models::submission::{SubmissionListQuery, SubmissionResponse};
use crate::state::AppState;

/// Find a hackathon by ID or return 404.
pub(crate) async fn find_hackathon<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<hackathon::Model, AppError> {
    hackathon::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid Hackathon ID".into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Hackathons",
    operation_id = "createHackathon",
    summary = "Create a hackathon",
    description = "Registers a hackathon owned by the given judge key. When `criteria` is omitted the generic innovation/impact rubric is stored.",
    request_body = CreateHackathonRequest,
    responses(
        (status = 201, description = "Hackathon created", body = HackathonResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(judge_id = %payload.judge_id))]
pub async fn create_hackathon(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateHackathonRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new = validate_create_hackathon(payload)?;

    let model = hackathon::ActiveModel {
        name: Set(new.name),
        judge_id: Set(new.judge_id),
        criteria: Set(Some(new.criteria)),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(hackathon_id = model.id, "Hackathon created");
    Ok((StatusCode::CREATED, Json(HackathonResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Hackathons",
    operation_id = "listHackathons",
    summary = "List a judge's hackathons",
    description = "Returns the hackathons owned by `judge_id`, newest first.",
    params(HackathonListQuery),
    responses(
        (status = 200, description = "Hackathons of the judge", body = Vec<HackathonResponse>),
        (status = 400, description = "Missing judge_id (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_hackathons(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<HackathonListQuery>,
) -> Result<Json<Vec<HackathonResponse>>, AppError> {
    let judge_id = query
        .judge_id
        .as_deref()
        .map(str::trim)
        .filter(|j| !j.is_empty())
        .ok_or_else(|| AppError::Validation("Judge ID is required".into()))?;

    let hackathons = hackathon::Entity::find()
        .filter(hackathon::Column::JudgeId.eq(judge_id))
        .order_by_desc(hackathon::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        hackathons.into_iter().map(HackathonResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/verify",
    tag = "Hackathons",
    operation_id = "verifyHackathon",
    summary = "Check a hackathon ID",
    description = "Lets a participant confirm a hackathon ID before submitting. Always answers with `valid`.",
    request_body = VerifyHackathonRequest,
    responses(
        (status = 200, description = "Hackathon exists", body = VerifyHackathonResponse),
        (status = 400, description = "ID is not an integer", body = VerifyHackathonResponse),
        (status = 404, description = "No such hackathon", body = VerifyHackathonResponse),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn verify_hackathon(
    State(state): State<AppState>,
    AppJson(payload): AppJson<VerifyHackathonRequest>,
) -> Result<(StatusCode, Json<VerifyHackathonResponse>), AppError> {
    let Some(id) = parse_hackathon_id(&payload.hackathon_id) else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(VerifyHackathonResponse::invalid("Invalid Hackathon ID format")),
        ));
    };

    let found = hackathon::Entity::find_by_id(id).one(&state.db).await?;
    Ok(match found {
        Some(h) => (StatusCode::OK, Json(VerifyHackathonResponse::valid(h.name))),
        None => (
            StatusCode::NOT_FOUND,
            Json(VerifyHackathonResponse::invalid("Invalid Hackathon ID")),
        ),
    })
}

#[utoipa::path(
    get,
    path = "/{id}/submissions",
    tag = "Hackathons",
    operation_id = "listHackathonSubmissions",
    summary = "Judge dashboard",
    description = "Returns every submission of the hackathon with its evaluation outcome, newest first.",
    params(
        ("id" = i32, Path, description = "Hackathon ID"),
        SubmissionListQuery,
    ),
    responses(
        (status = 200, description = "Submissions of the hackathon", body = Vec<SubmissionResponse>),
        (status = 404, description = "Hackathon not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(hackathon_id = %id))]
pub async fn list_hackathon_submissions(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppQuery(query): AppQuery<SubmissionListQuery>,
) -> Result<Json<Vec<SubmissionResponse>>, AppError> {
    let _ = find_hackathon(&state.db, id).await?;

    let mut select = submission::Entity::find().filter(submission::Column::HackathonId.eq(id));
    if let Some(status) = query.status {
        select = select.filter(submission::Column::Status.eq(status));
    }

    let submissions = select
        .order_by_desc(submission::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        submissions
            .into_iter()
            .map(SubmissionResponse::from)
            .collect(),
    ))
}
