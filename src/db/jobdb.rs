// db/jobdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::BigDecimal, Error};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::jobmodel::*;

const JOB_COLUMNS: &str = r#"
    id, owner_id, title, description, budget, deadline, category,
    quantity, status, is_remote, radius_meters, created_at, updated_at
"#;

#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct RelevantJob {
    pub id: Uuid,
    pub title: String,
}

#[async_trait]
pub trait JobExt {
    #[allow(clippy::too_many_arguments)]
    async fn create_job(
        &self,
        owner_id: Uuid,
        title: String,
        description: String,
        budget: BigDecimal,
        deadline: DateTime<Utc>,
        category: String,
        quantity: i32,
        is_remote: bool,
        location_wkt: Option<String>,
        radius_meters: Option<i32>,
    ) -> Result<Job, Error>;

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error>;

    /// Fetch a job inside a transaction with a row lock, so concurrent
    /// accept/complete calls on the same job serialize at the database.
    async fn get_job_for_update_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
    ) -> Result<Option<Job>, Error>;

    async fn get_open_jobs(
        &self,
        category: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Job>, Error>;

    async fn get_jobs_by_owner(&self, owner_id: Uuid) -> Result<Vec<Job>, Error>;

    /// Geospatial matching is delegated to the database-side
    /// get_relevant_jobs function over provider service zones.
    async fn get_relevant_jobs(&self, provider_id: Uuid) -> Result<Vec<RelevantJob>, Error>;

    async fn update_job_status_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
        status: JobStatus,
    ) -> Result<Job, Error>;

    /// Bump updated_at so the job's conversation sorts to the top of the list.
    async fn touch_job_updated_at(&self, job_id: Uuid) -> Result<(), Error>;
}

#[async_trait]
impl JobExt for DBClient {
    async fn create_job(
        &self,
        owner_id: Uuid,
        title: String,
        description: String,
        budget: BigDecimal,
        deadline: DateTime<Utc>,
        category: String,
        quantity: i32,
        is_remote: bool,
        location_wkt: Option<String>,
        radius_meters: Option<i32>,
    ) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs
            (owner_id, title, description, budget, deadline, category, quantity, is_remote, location, radius_meters)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
                    CASE WHEN $9::TEXT IS NULL THEN NULL ELSE ST_GeographyFromText($9) END,
                    $10)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(budget)
        .bind(deadline)
        .bind(category)
        .bind(quantity)
        .bind(is_remote)
        .bind(location_wkt)
        .bind(radius_meters)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE id = $1
            "#
        ))
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_job_for_update_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
    ) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE id = $1
            FOR UPDATE
            "#
        ))
        .bind(job_id)
        .fetch_optional(&mut **tx)
        .await
    }

    async fn get_open_jobs(
        &self,
        category: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE status = 'open'
              AND ($1::TEXT IS NULL OR category = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_jobs_by_owner(&self, owner_id: Uuid) -> Result<Vec<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE owner_id = $1
            ORDER BY updated_at DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_relevant_jobs(&self, provider_id: Uuid) -> Result<Vec<RelevantJob>, Error> {
        sqlx::query_as::<_, RelevantJob>(
            r#"
            SELECT id, title FROM get_relevant_jobs($1)
            "#,
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_job_status_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
        status: JobStatus,
    ) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(job_id)
        .bind(status)
        .fetch_one(&mut **tx)
        .await
    }

    async fn touch_job_updated_at(&self, job_id: Uuid) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE jobs SET updated_at = NOW() WHERE id = $1
            "#,
        )
        .bind(job_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
