use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::UserProfile;
use crate::models::user_cv::UserCv;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: Option<String>,
    pub dob: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CvResponse {
    pub id: Uuid,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserCv> for CvResponse {
    fn from(value: UserCv) -> Self {
        let url = format!("/uploads/cv/{}", value.filename);
        Self {
            id: value.id,
            filename: value.filename,
            original_name: value.original_name,
            mime_type: value.mime_type,
            url,
            created_at: value.created_at,
        }
    }
}

/// Profile payload: the account fields plus the active CV, if any.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileData {
    #[serde(flatten)]
    pub user: UserProfile,
    pub cv: Option<CvResponse>,
}
