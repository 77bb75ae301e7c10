use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::job_dto::{ApplyJobPayload, CreateJobPayload, JobSearchQuery};
use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::models::job::Job;

const JOB_COLUMNS: &str = "id, title, company, location, employment_type, skills, salary, \
     description, requirements, posted_by, created_at";

const APPLICATION_COLUMNS: &str =
    "id, job_id, user_id, name, email, cover_letter, cv_id, status, created_at";

/// Parameter destined for a `$n` placeholder in a built query.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Text(String),
    Int(i64),
}

pub enum SaveToggle {
    Saved,
    Removed,
}

/// Translates the optional search filters into a WHERE clause with
/// positional binds. Absent filters contribute nothing; every value is a
/// bound parameter.
pub fn build_search_query(query: &JobSearchQuery) -> (String, Vec<Bind>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut binds: Vec<Bind> = Vec::new();

    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        clauses.push(format!(
            "(title ILIKE ${} OR company ILIKE ${})",
            binds.len() + 1,
            binds.len() + 2
        ));
        binds.push(Bind::Text(pattern.clone()));
        binds.push(Bind::Text(pattern));
    }

    if let Some(kind) = query
        .employment_type
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        clauses.push(format!("employment_type = ${}", binds.len() + 1));
        binds.push(Bind::Text(kind.to_string()));
    }

    if let Some(location) = query
        .location
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        clauses.push(format!("location ILIKE ${}", binds.len() + 1));
        binds.push(Bind::Text(format!("%{}%", location)));
    }

    // Salary floor compares against the numeric prefix of the free-text
    // salary ("90k" -> 90). Salaries without a numeric prefix never match.
    if let Some(floor) = query.salary {
        clauses.push(format!(
            "CAST(SUBSTRING(salary FROM '^[0-9]+') AS BIGINT) >= ${}",
            binds.len() + 1
        ));
        binds.push(Bind::Int(floor));
    }

    // Conjunction of exact set-membership tests, one per listed skill.
    if let Some(skills) = query.skills.as_deref() {
        for skill in skills.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            clauses.push(format!(
                "EXISTS (SELECT 1 FROM unnest(skills) AS skill WHERE LOWER(skill) = ${})",
                binds.len() + 1
            ));
            binds.push(Bind::Text(skill.to_lowercase()));
        }
    }

    let mut sql = format!("SELECT {JOB_COLUMNS} FROM jobs");
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC");

    (sql, binds)
}

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn search(&self, query: &JobSearchQuery) -> Result<Vec<Job>> {
        let (sql, binds) = build_search_query(query);
        let mut statement = sqlx::query_as::<_, Job>(&sql);
        for bind in binds {
            statement = match bind {
                Bind::Text(value) => statement.bind(value),
                Bind::Int(value) => statement.bind(value),
            };
        }
        let jobs = statement.fetch_all(&self.pool).await?;
        Ok(jobs)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        job.ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    pub async fn create(&self, payload: CreateJobPayload, posted_by: Uuid) -> Result<Job> {
        let skills = payload
            .skills
            .map(|s| s.into_vec())
            .unwrap_or_default();

        let job = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs \
                 (title, company, location, employment_type, skills, salary, description, requirements, posted_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(&payload.title)
        .bind(&payload.company)
        .bind(&payload.location)
        .bind(&payload.employment_type)
        .bind(&skills)
        .bind(&payload.salary)
        .bind(&payload.description)
        .bind(&payload.requirements)
        .bind(posted_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    /// Delete-first toggle. The composite primary key on saved_jobs makes
    /// the insert side conflict-free under concurrent repeats.
    pub async fn toggle_save(&self, user_id: Uuid, job_id: Uuid) -> Result<SaveToggle> {
        self.get_by_id(job_id).await?;

        let removed = sqlx::query("DELETE FROM saved_jobs WHERE user_id = $1 AND job_id = $2")
            .bind(user_id)
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        if removed.rows_affected() > 0 {
            return Ok(SaveToggle::Removed);
        }

        sqlx::query(
            "INSERT INTO saved_jobs (user_id, job_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, job_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(job_id)
        .execute(&self.pool)
        .await?;
        Ok(SaveToggle::Saved)
    }

    pub async fn saved_job_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT job_id FROM saved_jobs WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    /// Inserts an application for the authenticated user. Re-applying to the
    /// same job is allowed. The payload has already passed validation.
    pub async fn apply(
        &self,
        job_id: Uuid,
        user_id: Uuid,
        payload: ApplyJobPayload,
    ) -> Result<Application> {
        self.get_by_id(job_id).await?;

        if let Some(cv_id) = payload.cv_id {
            let owned =
                sqlx::query_scalar::<_, Uuid>("SELECT id FROM user_cvs WHERE id = $1 AND user_id = $2")
                    .bind(cv_id)
                    .bind(user_id)
                    .fetch_optional(&self.pool)
                    .await?;
            if owned.is_none() {
                return Err(Error::BadRequest("Unknown CV reference".to_string()));
            }
        }

        let application = sqlx::query_as::<_, Application>(&format!(
            "INSERT INTO applications (job_id, user_id, name, email, cover_letter, cv_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(job_id)
        .bind(user_id)
        .bind(payload.name.unwrap_or_default())
        .bind(payload.email.unwrap_or_default())
        .bind(payload.cover_letter.unwrap_or_default())
        .bind(payload.cv_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(f: impl FnOnce(&mut JobSearchQuery)) -> JobSearchQuery {
        let mut q = JobSearchQuery::default();
        f(&mut q);
        q
    }

    #[test]
    fn empty_filters_build_unconstrained_query() {
        let (sql, binds) = build_search_query(&JobSearchQuery::default());
        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with("ORDER BY created_at DESC"));
        assert!(binds.is_empty());
    }

    #[test]
    fn search_matches_title_or_company() {
        let (sql, binds) = build_search_query(&query(|q| q.search = Some("rust".into())));
        assert!(sql.contains("(title ILIKE $1 OR company ILIKE $2)"));
        assert_eq!(
            binds,
            vec![Bind::Text("%rust%".into()), Bind::Text("%rust%".into())]
        );
    }

    #[test]
    fn type_filter_is_exact_match() {
        let (sql, binds) = build_search_query(&query(|q| q.employment_type = Some("Full-time".into())));
        assert!(sql.contains("employment_type = $1"));
        assert_eq!(binds, vec![Bind::Text("Full-time".into())]);
    }

    #[test]
    fn salary_filter_compares_numeric_prefix() {
        let (sql, binds) = build_search_query(&query(|q| q.salary = Some(80)));
        assert!(sql.contains("CAST(SUBSTRING(salary FROM '^[0-9]+') AS BIGINT) >= $1"));
        assert_eq!(binds, vec![Bind::Int(80)]);
    }

    #[test]
    fn skills_filter_is_a_conjunction_of_membership_tests() {
        let (sql, binds) =
            build_search_query(&query(|q| q.skills = Some("React,Node.js".into())));
        assert!(sql.contains("LOWER(skill) = $1"));
        assert!(sql.contains("LOWER(skill) = $2"));
        assert!(sql.contains(" AND "));
        assert_eq!(
            binds,
            vec![Bind::Text("react".into()), Bind::Text("node.js".into())]
        );
    }

    #[test]
    fn skills_filter_skips_empty_segments() {
        let (_, binds) = build_search_query(&query(|q| q.skills = Some("React, ,".into())));
        assert_eq!(binds, vec![Bind::Text("react".into())]);
    }

    #[test]
    fn combined_filters_number_binds_positionally() {
        let q = query(|q| {
            q.search = Some("engineer".into());
            q.location = Some("Berlin".into());
            q.salary = Some(90);
        });
        let (sql, binds) = build_search_query(&q);
        assert!(sql.contains("(title ILIKE $1 OR company ILIKE $2)"));
        assert!(sql.contains("location ILIKE $3"));
        assert!(sql.contains(">= $4"));
        assert_eq!(binds.len(), 4);
    }

    #[test]
    fn blank_filters_are_ignored() {
        let q = query(|q| {
            q.search = Some("   ".into());
            q.location = Some(String::new());
        });
        let (sql, binds) = build_search_query(&q);
        assert!(!sql.contains("WHERE"));
        assert!(binds.is_empty());
    }
}
