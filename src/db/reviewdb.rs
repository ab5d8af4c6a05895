// db/reviewdb.rs
use async_trait::async_trait;
use sqlx::{Error, QueryBuilder};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::jobmodel::Review;

#[derive(Debug, Clone)]
pub struct NewReview {
    pub reviewee_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

#[async_trait]
pub trait ReviewExt {
    /// Single multi-row insert inside the caller's transaction, so either every
    /// review lands or none do.
    async fn create_reviews_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
        reviewer_id: Uuid,
        reviews: &[NewReview],
    ) -> Result<Vec<Review>, Error>;

    async fn get_job_reviews(&self, job_id: Uuid) -> Result<Vec<Review>, Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn create_reviews_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
        reviewer_id: Uuid,
        reviews: &[NewReview],
    ) -> Result<Vec<Review>, Error> {
        if reviews.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::new(
            "INSERT INTO reviews (job_id, reviewer_id, reviewee_id, rating, comment) ",
        );
        builder.push_values(reviews, |mut row, review| {
            row.push_bind(job_id)
                .push_bind(reviewer_id)
                .push_bind(review.reviewee_id)
                .push_bind(review.rating)
                .push_bind(review.comment.clone());
        });
        builder.push(
            " RETURNING id, job_id, reviewer_id, reviewee_id, rating, comment, created_at",
        );

        builder
            .build_query_as::<Review>()
            .fetch_all(&mut **tx)
            .await
    }

    async fn get_job_reviews(&self, job_id: Uuid) -> Result<Vec<Review>, Error> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, job_id, reviewer_id, reviewee_id, rating, comment, created_at
            FROM reviews
            WHERE job_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }
}
