use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::api::job::JobPayload;
use crate::db::models::JobRow;

const JOB_COLUMNS: &str =
    "id, designation, description, keywords, company_name, work_experience, salary, created_at, updated_at";

/// Storage operations for job postings
///
/// Listing methods return rows in ascending id order.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create(&self, job: &JobPayload) -> Result<JobRow, sqlx::Error>;

    async fn find_by_id(&self, id: i64) -> Result<Option<JobRow>, sqlx::Error>;

    async fn find_all(&self) -> Result<Vec<JobRow>, sqlx::Error>;

    /// Overwrite every mutable field; `None` when the id does not exist
    async fn update(&self, id: i64, job: &JobPayload) -> Result<Option<JobRow>, sqlx::Error>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i64) -> Result<bool, sqlx::Error>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, sqlx::Error>;

    /// Case-insensitive substring match against designation, company name,
    /// description and keywords
    async fn search_by_term(&self, term: &str) -> Result<Vec<JobRow>, sqlx::Error>;

    /// Round trip to the backing store
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// PostgreSQL-backed job repository
pub struct PgJobRepository {
    pool: Pool<Postgres>,
}

impl PgJobRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobRepository {
    async fn create(&self, job: &JobPayload) -> Result<JobRow, sqlx::Error> {
        debug!("Creating job: designation={}, company={}", job.designation, job.company_name);

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (designation, description, keywords, company_name, work_experience, salary)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(&job.designation)
        .bind(&job.description)
        .bind(&job.keywords)
        .bind(&job.company_name)
        .bind(job.work_experience)
        .bind(job.salary)
        .fetch_one(&self.pool)
        .await?;

        debug!("Job created with id={}", row.id);
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_all(&self) -> Result<Vec<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>(&format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY id"))
            .fetch_all(&self.pool)
            .await
    }

    async fn update(&self, id: i64, job: &JobPayload) -> Result<Option<JobRow>, sqlx::Error> {
        debug!("Updating job {}: designation={}", id, job.designation);

        sqlx::query_as::<_, JobRow>(&format!(
            r#"
            UPDATE jobs
            SET designation = $2,
                description = $3,
                keywords = $4,
                company_name = $5,
                work_experience = $6,
                salary = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&job.designation)
        .bind(&job.description)
        .bind(&job.keywords)
        .bind(&job.company_name)
        .bind(job.work_experience)
        .bind(job.salary)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!("Delete of job {} affected {} rows", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    async fn search_by_term(&self, term: &str) -> Result<Vec<JobRow>, sqlx::Error> {
        // strpos keeps `%` and `_` in the term literal, unlike LIKE
        sqlx::query_as::<_, JobRow>(&format!(
            r#"
            SELECT {JOB_COLUMNS} FROM jobs
            WHERE strpos(lower(designation), lower($1)) > 0
               OR strpos(lower(company_name), lower($1)) > 0
               OR strpos(lower(description), lower($1)) > 0
               OR strpos(lower(keywords), lower($1)) > 0
            ORDER BY id
            "#
        ))
        .bind(term)
        .fetch_all(&self.pool)
        .await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
