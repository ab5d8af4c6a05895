// service/job_service.rs
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::BigDecimal;
use uuid::Uuid;

use crate::{
    db::{
        biddb::BidExt,
        db::DBClient,
        jobdb::JobExt,
        reviewdb::{NewReview, ReviewExt},
    },
    models::jobmodel::*,
    service::{error::ServiceError, notification_service::NotificationService},
};

/// The job lifecycle core: placing bids, the accept/hiring-capacity state
/// machine, and completion with reviews. Every operation takes an explicit
/// acting-user id; authentication is resolved upstream by the middleware.
#[derive(Debug, Clone)]
pub struct JobService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

#[derive(Debug, Serialize)]
pub struct AcceptBidResult {
    pub bid: Bid,
    pub job_full: bool,
    pub hired_count: i64,
}

impl JobService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_job(
        &self,
        owner_id: Uuid,
        title: String,
        description: String,
        budget: f64,
        deadline: DateTime<Utc>,
        category: String,
        quantity: i32,
        is_remote: bool,
        location_wkt: Option<String>,
        radius_meters: Option<i32>,
    ) -> Result<Job, ServiceError> {
        check_deadline(deadline)?;
        if quantity < 1 {
            return Err(ServiceError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }
        let budget = to_money(budget, "budget")?;

        let job = self
            .db_client
            .create_job(
                owner_id,
                title,
                description,
                budget,
                deadline,
                category,
                quantity,
                is_remote,
                location_wkt,
                radius_meters,
            )
            .await?;

        Ok(job)
    }

    /// One bid per (job, bidder). The pre-check gives the friendly error; the
    /// unique index on (job_id, bidder_id) closes the race between two
    /// concurrent inserts from the same bidder.
    pub async fn place_bid(
        &self,
        job_id: Uuid,
        bidder_id: Uuid,
        amount: f64,
        proposal_text: Option<String>,
    ) -> Result<Bid, ServiceError> {
        let amount = to_money(amount, "amount")?;

        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.owner_id == bidder_id {
            return Err(ServiceError::Validation(
                "You cannot bid on your own job".to_string(),
            ));
        }

        if job.status != JobStatus::Open {
            return Err(ServiceError::JobNotOpen(job_id, job.status));
        }

        if self
            .db_client
            .get_bid_by_job_and_bidder(job_id, bidder_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::DuplicateBid { job_id, bidder_id });
        }

        let bid = self
            .db_client
            .create_bid(job_id, bidder_id, amount, proposal_text)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    ServiceError::DuplicateBid { job_id, bidder_id }
                }
                _ => ServiceError::Database(e),
            })?;

        self.notification_service
            .notify_bid_placed(&job, &bid)
            .await;

        Ok(bid)
    }

    /// Accept one pending bid, respecting the hiring cap. The whole
    /// read-validate-write sequence runs in a single transaction with the job
    /// row locked, so concurrent accepts serialize and the capacity check
    /// cannot be overtaken. Either every write commits or none do.
    pub async fn accept_bid(
        &self,
        job_id: Uuid,
        bid_id: Uuid,
        acting_user_id: Uuid,
    ) -> Result<AcceptBidResult, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let job = self
            .db_client
            .get_job_for_update_tx(&mut tx, job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.owner_id != acting_user_id {
            return Err(ServiceError::UnauthorizedJobAccess(acting_user_id, job_id));
        }

        if job.status != JobStatus::Open {
            return Err(ServiceError::JobNotOpen(job_id, job.status));
        }

        let bid = self
            .db_client
            .get_bid_for_update_tx(&mut tx, bid_id)
            .await?
            .ok_or(ServiceError::BidNotFound(bid_id))?;

        if bid.job_id != job_id {
            return Err(ServiceError::Validation(
                "Bid does not belong to this job".to_string(),
            ));
        }

        // Accepted and rejected are terminal. Re-accepting is an explicit
        // error rather than a silent no-op, and never counts toward capacity.
        if bid.status.is_terminal() {
            return Err(ServiceError::BidNotPending(bid_id));
        }

        let current_hires = self.db_client.count_accepted_bids_tx(&mut tx, job_id).await?;
        check_capacity(current_hires, job.quantity, job_id)?;

        let accepted_bid = self
            .db_client
            .update_bid_status_tx(&mut tx, bid_id, BidStatus::Accepted)
            .await?;

        let hired_count = current_hires + 1;
        let job_full = is_full_after_hire(current_hires, job.quantity);

        let rejected_bidders = if job_full {
            self.db_client
                .update_job_status_tx(&mut tx, job_id, JobStatus::InProgress)
                .await?;
            self.db_client.reject_pending_bids_tx(&mut tx, job_id).await?
        } else {
            Vec::new()
        };

        tx.commit().await?;

        self.notification_service
            .notify_bid_accepted(&job, &accepted_bid)
            .await;
        self.notification_service
            .notify_bids_rejected(&job, &rejected_bidders)
            .await;

        Ok(AcceptBidResult {
            bid: accepted_bid,
            job_full,
            hired_count,
        })
    }

    /// Record one review per hired provider and close the job, atomically.
    /// An empty review list completes the job without ratings.
    pub async fn complete_job(
        &self,
        job_id: Uuid,
        acting_user_id: Uuid,
        reviews: Vec<NewReview>,
    ) -> Result<Job, ServiceError> {
        for review in &reviews {
            if !(1..=5).contains(&review.rating) {
                return Err(ServiceError::Validation(
                    "Rating must be between 1 and 5".to_string(),
                ));
            }
        }

        let mut tx = self.db_client.pool.begin().await?;

        let job = self
            .db_client
            .get_job_for_update_tx(&mut tx, job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.owner_id != acting_user_id {
            return Err(ServiceError::UnauthorizedJobAccess(acting_user_id, job_id));
        }

        if !job.status.can_advance_to(JobStatus::Completed) {
            return Err(ServiceError::AlreadyCompleted(job_id));
        }

        let hired = self
            .db_client
            .get_accepted_provider_ids_tx(&mut tx, job_id)
            .await?;

        if !reviews.is_empty() {
            validate_review_set(&hired, &reviews)?;
            self.db_client
                .create_reviews_tx(&mut tx, job_id, acting_user_id, &reviews)
                .await?;
        }

        let completed_job = self
            .db_client
            .update_job_status_tx(&mut tx, job_id, JobStatus::Completed)
            .await?;

        tx.commit().await?;

        self.notification_service
            .notify_job_completed(&completed_job, &hired)
            .await;

        Ok(completed_job)
    }
}

fn to_money(value: f64, field: &str) -> Result<BigDecimal, ServiceError> {
    if value <= 0.0 {
        return Err(ServiceError::Validation(format!(
            "{} must be greater than 0",
            field
        )));
    }
    BigDecimal::try_from(value)
        .map_err(|_| ServiceError::Validation(format!("Invalid {} value", field)))
}

fn check_deadline(deadline: DateTime<Utc>) -> Result<(), ServiceError> {
    if deadline < Utc::now() {
        return Err(ServiceError::Validation(
            "Deadline cannot be in the past".to_string(),
        ));
    }
    Ok(())
}

fn check_capacity(current_hires: i64, quantity: i32, job_id: Uuid) -> Result<(), ServiceError> {
    if current_hires >= quantity as i64 {
        return Err(ServiceError::HiringLimitReached { job_id, quantity });
    }
    Ok(())
}

fn is_full_after_hire(current_hires: i64, quantity: i32) -> bool {
    current_hires + 1 >= quantity as i64
}

/// The reviews supplied to complete_job must cover the hired providers
/// exactly: no provider omitted, no foreign provider, no duplicates.
fn validate_review_set(hired: &[Uuid], reviews: &[NewReview]) -> Result<(), ServiceError> {
    let hired_set: HashSet<Uuid> = hired.iter().copied().collect();
    let mut seen: HashSet<Uuid> = HashSet::with_capacity(reviews.len());

    for review in reviews {
        if !hired_set.contains(&review.reviewee_id) {
            return Err(ServiceError::ReviewMismatch(format!(
                "provider {} was not hired for this job",
                review.reviewee_id
            )));
        }
        if !seen.insert(review.reviewee_id) {
            return Err(ServiceError::ReviewMismatch(format!(
                "duplicate review for provider {}",
                review.reviewee_id
            )));
        }
    }

    if seen.len() != hired_set.len() {
        return Err(ServiceError::ReviewMismatch(
            "every hired provider must be reviewed".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid(n: u8) -> Uuid {
        Uuid::from_bytes([n; 16])
    }

    fn review_for(provider: Uuid) -> NewReview {
        NewReview {
            reviewee_id: provider,
            rating: 5,
            comment: None,
        }
    }

    #[test]
    fn capacity_check_allows_hiring_below_the_cap() {
        assert!(check_capacity(0, 1, uuid(1)).is_ok());
        assert!(check_capacity(1, 2, uuid(1)).is_ok());
    }

    #[test]
    fn capacity_check_rejects_hiring_at_the_cap() {
        assert!(matches!(
            check_capacity(1, 1, uuid(1)),
            Err(ServiceError::HiringLimitReached { quantity: 1, .. })
        ));
        assert!(matches!(
            check_capacity(2, 2, uuid(1)),
            Err(ServiceError::HiringLimitReached { quantity: 2, .. })
        ));
        // Over-capacity should never happen, but the check still refuses it.
        assert!(check_capacity(3, 2, uuid(1)).is_err());
    }

    #[test]
    fn single_hire_job_fills_on_first_accept() {
        // quantity=1: accepting the first bid fills the job, which triggers
        // the in_progress flip and the bulk rejection of remaining bids.
        assert!(is_full_after_hire(0, 1));
    }

    #[test]
    fn multi_hire_job_fills_only_on_last_slot() {
        // quantity=2: first accept leaves the job open, second fills it.
        assert!(!is_full_after_hire(0, 2));
        assert!(is_full_after_hire(1, 2));
    }

    #[test]
    fn review_set_must_match_hired_providers_exactly() {
        let a = uuid(1);
        let b = uuid(2);
        let stranger = uuid(9);

        assert!(validate_review_set(&[a, b], &[review_for(a), review_for(b)]).is_ok());

        // Omission
        assert!(matches!(
            validate_review_set(&[a, b], &[review_for(a)]),
            Err(ServiceError::ReviewMismatch(_))
        ));

        // Foreign provider
        assert!(matches!(
            validate_review_set(&[a], &[review_for(stranger)]),
            Err(ServiceError::ReviewMismatch(_))
        ));

        // Duplicate
        assert!(matches!(
            validate_review_set(&[a, b], &[review_for(a), review_for(a)]),
            Err(ServiceError::ReviewMismatch(_))
        ));
    }

    #[test]
    fn deadline_cannot_be_in_the_past() {
        assert!(check_deadline(Utc::now() - chrono::Duration::hours(1)).is_err());
        assert!(check_deadline(Utc::now() + chrono::Duration::days(7)).is_ok());
    }

    #[test]
    fn money_conversion_rejects_non_positive_amounts() {
        assert!(to_money(0.0, "amount").is_err());
        assert!(to_money(-10.0, "amount").is_err());
        assert!(to_money(150.0, "amount").is_ok());
    }
}
