use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user_dto::UpdateProfilePayload;
use crate::error::{Error, Result};
use crate::models::application::ApplicationWithJob;
use crate::models::user::User;
use crate::models::user_cv::UserCv;

const USER_COLUMNS: &str = "id, email, password_hash, username, dob, role, created_at";

const CV_COLUMNS: &str = "id, user_id, filename, original_name, file_path, mime_type, created_at";

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        user.ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    pub async fn update_profile(&self, id: Uuid, payload: UpdateProfilePayload) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                 username = COALESCE($2, username), \
                 dob = COALESCE($3, dob) \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(&payload.username)
        .bind(payload.dob)
        .fetch_optional(&self.pool)
        .await?;
        user.ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    pub async fn list_applications(&self, user_id: Uuid) -> Result<Vec<ApplicationWithJob>> {
        let applications = sqlx::query_as::<_, ApplicationWithJob>(
            "SELECT a.id, a.job_id, j.title AS job_title, j.company AS job_company, \
                    a.status, a.created_at \
             FROM applications a \
             JOIN jobs j ON j.id = a.job_id \
             WHERE a.user_id = $1 \
             ORDER BY a.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    /// The active CV is the most recently uploaded row.
    pub async fn latest_cv(&self, user_id: Uuid) -> Result<Option<UserCv>> {
        let cv = sqlx::query_as::<_, UserCv>(&format!(
            "SELECT {CV_COLUMNS} FROM user_cvs \
             WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(cv)
    }

    pub async fn insert_cv(
        &self,
        user_id: Uuid,
        filename: &str,
        original_name: &str,
        file_path: &str,
        mime_type: &str,
    ) -> Result<UserCv> {
        let cv = sqlx::query_as::<_, UserCv>(&format!(
            "INSERT INTO user_cvs (user_id, filename, original_name, file_path, mime_type) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {CV_COLUMNS}"
        ))
        .bind(user_id)
        .bind(filename)
        .bind(original_name)
        .bind(file_path)
        .bind(mime_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(cv)
    }

    /// Removes all CV rows for the user and returns them so the caller can
    /// clean up the stored files. Applications keep their rows; their cv_id
    /// reference is nulled by the foreign key.
    pub async fn remove_cvs(&self, user_id: Uuid) -> Result<Vec<UserCv>> {
        let removed = sqlx::query_as::<_, UserCv>(&format!(
            "DELETE FROM user_cvs WHERE user_id = $1 RETURNING {CV_COLUMNS}"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(removed)
    }
}
