pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;

use crate::services::{
    admin_service::AdminService, auth_service::AuthService, job_service::JobService,
    user_service::UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: AuthService,
    pub job_service: JobService,
    pub user_service: UserService,
    pub admin_service: AdminService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let auth_service = AuthService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let user_service = UserService::new(pool.clone());
        let admin_service = AdminService::new(pool.clone());

        Self {
            pool,
            auth_service,
            job_service,
            user_service,
            admin_service,
        }
    }
}

/// Full application router. Protected user routes authenticate through the
/// `Claims` extractor; the admin subtree is gated by a route layer.
pub fn create_router(state: AppState) -> Router {
    let public_and_user_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/admin/login", post(routes::auth::admin_login))
        .route(
            "/api/jobs",
            get(routes::jobs::list_jobs).post(routes::jobs::create_job),
        )
        .route("/api/jobs/:id", get(routes::jobs::get_job))
        .route("/api/jobs/:id/save", post(routes::jobs::toggle_save))
        .route("/api/jobs/:id/apply", post(routes::jobs::apply_for_job))
        .route("/api/saved-jobs", get(routes::jobs::list_saved_jobs))
        .route("/api/user/applications", get(routes::user::list_applications))
        .route(
            "/api/user/profile",
            get(routes::user::get_profile).put(routes::user::update_profile),
        )
        .route(
            "/user/upload-cv",
            post(routes::user::upload_cv)
                .layer(DefaultBodyLimit::max(routes::user::MAX_CV_BYTES)),
        )
        .route("/user/remove-cv", delete(routes::user::remove_cv));

    let admin_api = Router::new()
        .route("/admin/jobs", get(routes::admin::list_jobs))
        .route("/admin/jobs/:id", delete(routes::admin::delete_job))
        .route("/admin/users", get(routes::admin::list_users))
        .route("/admin/users/:id", delete(routes::admin::delete_user))
        .route("/admin/dashboard/stats", get(routes::admin::dashboard_stats))
        .route_layer(axum::middleware::from_fn(
            middleware::auth::require_admin_auth,
        ));

    public_and_user_api.merge(admin_api).with_state(state)
}
