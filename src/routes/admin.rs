use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::{auth_dto::UserProfile, ApiResponse, MessageResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/admin/jobs",
    responses(
        (status = 200, description = "All jobs"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin access required")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state.admin_service.list_jobs().await?;
    Ok(Json(ApiResponse::new(jobs)))
}

#[utoipa::path(
    delete,
    path = "/admin/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job and dependents deleted"),
        (status = 404, description = "Job not found"),
        (status = 500, description = "Delete failed, no partial effect")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.admin_service.delete_job(id).await?;
    Ok(Json(MessageResponse::new("Job deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/admin/users",
    responses(
        (status = 200, description = "All user-role accounts"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin access required")
    )
)]
#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.admin_service.list_users().await?;
    let profiles: Vec<UserProfile> = users.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::new(profiles)))
}

#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User and dependents deleted"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Delete failed, no partial effect")
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.admin_service.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/admin/dashboard/stats",
    responses(
        (status = 200, description = "Aggregate counts"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin access required")
    )
)]
#[axum::debug_handler]
pub async fn dashboard_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.admin_service.dashboard_stats().await?;
    Ok(Json(ApiResponse::new(stats)))
}
