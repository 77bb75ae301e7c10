use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        job_dto::{ApplyJobPayload, CreateJobPayload, JobSearchQuery},
        ApiResponse, MessageResponse,
    },
    error::Result,
    middleware::auth::Claims,
    services::job_service::SaveToggle,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("search" = Option<String>, Query, description = "Substring match on title or company"),
        ("type" = Option<String>, Query, description = "Exact employment type"),
        ("location" = Option<String>, Query, description = "Substring match on location"),
        ("salary" = Option<i64>, Query, description = "Salary floor in thousands"),
        ("skills" = Option<String>, Query, description = "Comma-separated skill list")
    ),
    responses(
        (status = 200, description = "Matching jobs")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.search(&query).await?;
    Ok(Json(ApiResponse::new(jobs)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    Ok(Json(ApiResponse::new(job)))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created"),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.create(payload, claims.user_id()?).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(job))))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/save",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Save state toggled"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn toggle_save(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let outcome = state.job_service.toggle_save(claims.user_id()?, id).await?;
    let message = match outcome {
        SaveToggle::Saved => "Job saved successfully",
        SaveToggle::Removed => "Job removed from saved jobs",
    };
    Ok(Json(MessageResponse::new(message)))
}

#[utoipa::path(
    get,
    path = "/api/saved-jobs",
    responses(
        (status = 200, description = "Saved job ids for the caller"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn list_saved_jobs(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<impl IntoResponse> {
    let ids = state.job_service.saved_job_ids(claims.user_id()?).await?;
    Ok(Json(ApiResponse::new(ids)))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/apply",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    request_body = ApplyJobPayload,
    responses(
        (status = 201, description = "Application submitted"),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn apply_for_job(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApplyJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .job_service
        .apply(id, claims.user_id()?, payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Application submitted successfully",
            application,
        )),
    ))
}
