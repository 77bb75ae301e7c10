use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_PENDING: &str = "PENDING";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub cover_letter: String,
    pub cv_id: Option<Uuid>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Application row joined with the job it targets, for the user's
/// "my applications" listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationWithJob {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub job_company: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
