use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::admin_dto::DashboardStats;
use crate::error::{Error, Result};
use crate::models::job::Job;
use crate::models::user::{User, ROLE_USER};

const JOB_COLUMNS: &str = "id, title, company, location, employment_type, skills, salary, \
     description, requirements, posted_by, created_at";

const USER_COLUMNS: &str = "id, email, password_hash, username, dob, role, created_at";

#[derive(Clone)]
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_jobs(&self) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY created_at DESC"
        ))
        .bind(ROLE_USER)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Dependent applications and bookmarks go first, then the job itself,
    /// all inside one transaction. Any failure rolls the whole delete back.
    pub async fn delete_job(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let found = sqlx::query_scalar::<_, Uuid>("SELECT id FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Err(Error::NotFound("Job not found".to_string()));
        }

        sqlx::query("DELETE FROM applications WHERE job_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::DeleteFailed(e.to_string()))?;
        sqlx::query("DELETE FROM saved_jobs WHERE job_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::DeleteFailed(e.to_string()))?;
        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::DeleteFailed(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| Error::DeleteFailed(e.to_string()))?;
        Ok(())
    }

    /// Same atomicity contract as job deletion. Jobs posted by the user
    /// survive; the posted_by foreign key nulls itself.
    pub async fn delete_user(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let found = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Err(Error::NotFound("User not found".to_string()));
        }

        sqlx::query("DELETE FROM applications WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::DeleteFailed(e.to_string()))?;
        sqlx::query("DELETE FROM saved_jobs WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::DeleteFailed(e.to_string()))?;
        sqlx::query("DELETE FROM user_cvs WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::DeleteFailed(e.to_string()))?;
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::DeleteFailed(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| Error::DeleteFailed(e.to_string()))?;
        Ok(())
    }

    /// Four independent counts, recomputed per request.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let total_jobs = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await?;
        let total_users =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
                .bind(ROLE_USER)
                .fetch_one(&self.pool)
                .await?;
        let total_applications = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications")
            .fetch_one(&self.pool)
            .await?;
        let pending_applications =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications WHERE status = $1")
                .bind(crate::models::application::STATUS_PENDING)
                .fetch_one(&self.pool)
                .await?;

        Ok(DashboardStats {
            total_jobs,
            total_users,
            total_applications,
            pending_applications,
        })
    }
}
