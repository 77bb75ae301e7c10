use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthResponse, LoginPayload, RegisterPayload},
    error::Result,
    models::user::{ROLE_ADMIN, ROLE_USER},
    AppState,
};

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Registration successful", body = Json<AuthResponse>),
        (status = 400, description = "Invalid payload or duplicate email")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, token) = state.auth_service.register(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new("Registration successful", user, token)),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login successful", body = Json<AuthResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account role mismatch")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, token) = state
        .auth_service
        .login(&payload.email, &payload.password, ROLE_USER)
        .await?;
    Ok(Json(AuthResponse::new("Login successful", user, token)))
}

#[utoipa::path(
    post,
    path = "/auth/admin/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login successful", body = Json<AuthResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account role mismatch")
    )
)]
#[axum::debug_handler]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, token) = state
        .auth_service
        .login(&payload.email, &payload.password, ROLE_ADMIN)
        .await?;
    Ok(Json(AuthResponse::new("Login successful", user, token)))
}
