pub mod admin_service;
pub mod auth_service;
pub mod job_service;
pub mod user_service;
