// db/biddb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::BigDecimal, Error};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::jobmodel::{Bid, BidStatus};

/// Bid row joined with the bidder's profile at the data-access layer, so
/// callers get one well-defined shape instead of unwrapping ad-hoc joins.
#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct BidWithBidder {
    pub id: Uuid,
    pub job_id: Uuid,
    pub bidder_id: Uuid,
    pub amount: BigDecimal,
    pub proposal_text: Option<String>,
    pub status: BidStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub bidder_name: Option<String>,
    pub bidder_avatar_url: Option<String>,
}

#[async_trait]
pub trait BidExt {
    async fn create_bid(
        &self,
        job_id: Uuid,
        bidder_id: Uuid,
        amount: BigDecimal,
        proposal_text: Option<String>,
    ) -> Result<Bid, Error>;

    async fn get_bid_by_job_and_bidder(
        &self,
        job_id: Uuid,
        bidder_id: Uuid,
    ) -> Result<Option<Bid>, Error>;

    async fn get_bid_for_update_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        bid_id: Uuid,
    ) -> Result<Option<Bid>, Error>;

    /// Bids for the owner's review screen, cheapest first. Ordering is a
    /// presentation policy only; the owner may accept any pending bid.
    async fn get_bids_for_job(&self, job_id: Uuid) -> Result<Vec<BidWithBidder>, Error>;

    async fn count_accepted_bids_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
    ) -> Result<i64, Error>;

    async fn get_accepted_provider_ids(&self, job_id: Uuid) -> Result<Vec<Uuid>, Error>;

    async fn get_accepted_provider_ids_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
    ) -> Result<Vec<Uuid>, Error>;

    async fn update_bid_status_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        bid_id: Uuid,
        status: BidStatus,
    ) -> Result<Bid, Error>;

    /// Bulk-reject every still-pending bid on the job. The just-accepted bid
    /// is never touched: it is no longer pending inside the same transaction.
    /// Returns the bidder ids whose bids were rejected.
    async fn reject_pending_bids_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
    ) -> Result<Vec<Uuid>, Error>;
}

#[async_trait]
impl BidExt for DBClient {
    async fn create_bid(
        &self,
        job_id: Uuid,
        bidder_id: Uuid,
        amount: BigDecimal,
        proposal_text: Option<String>,
    ) -> Result<Bid, Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            INSERT INTO bids (job_id, bidder_id, amount, proposal_text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, job_id, bidder_id, amount, proposal_text, status, created_at
            "#,
        )
        .bind(job_id)
        .bind(bidder_id)
        .bind(amount)
        .bind(proposal_text)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_bid_by_job_and_bidder(
        &self,
        job_id: Uuid,
        bidder_id: Uuid,
    ) -> Result<Option<Bid>, Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, job_id, bidder_id, amount, proposal_text, status, created_at
            FROM bids
            WHERE job_id = $1 AND bidder_id = $2
            "#,
        )
        .bind(job_id)
        .bind(bidder_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_bid_for_update_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        bid_id: Uuid,
    ) -> Result<Option<Bid>, Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, job_id, bidder_id, amount, proposal_text, status, created_at
            FROM bids
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(bid_id)
        .fetch_optional(&mut **tx)
        .await
    }

    async fn get_bids_for_job(&self, job_id: Uuid) -> Result<Vec<BidWithBidder>, Error> {
        sqlx::query_as::<_, BidWithBidder>(
            r#"
            SELECT
                b.id, b.job_id, b.bidder_id, b.amount, b.proposal_text, b.status, b.created_at,
                p.full_name AS bidder_name,
                p.avatar_url AS bidder_avatar_url
            FROM bids b
            LEFT JOIN profiles p ON p.id = b.bidder_id
            WHERE b.job_id = $1
            ORDER BY b.amount ASC, b.created_at ASC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_accepted_bids_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
    ) -> Result<i64, Error> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM bids
            WHERE job_id = $1 AND status = 'accepted'
            "#,
        )
        .bind(job_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count.0)
    }

    async fn get_accepted_provider_ids(&self, job_id: Uuid) -> Result<Vec<Uuid>, Error> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT bidder_id FROM bids
            WHERE job_id = $1 AND status = 'accepted'
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn get_accepted_provider_ids_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
    ) -> Result<Vec<Uuid>, Error> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT bidder_id FROM bids
            WHERE job_id = $1 AND status = 'accepted'
            "#,
        )
        .bind(job_id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn update_bid_status_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        bid_id: Uuid,
        status: BidStatus,
    ) -> Result<Bid, Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            UPDATE bids
            SET status = $2
            WHERE id = $1
            RETURNING id, job_id, bidder_id, amount, proposal_text, status, created_at
            "#,
        )
        .bind(bid_id)
        .bind(status)
        .fetch_one(&mut **tx)
        .await
    }

    async fn reject_pending_bids_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
    ) -> Result<Vec<Uuid>, Error> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE bids
            SET status = 'rejected'
            WHERE job_id = $1 AND status = 'pending'
            RETURNING bidder_id
            "#,
        )
        .bind(job_id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
