// models/jobmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    InProgress,
    Completed,
}

impl JobStatus {
    pub fn to_str(&self) -> &str {
        match self {
            JobStatus::Open => "open",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
        }
    }

    /// Job status only ever moves forward: open -> in_progress -> completed.
    pub fn can_advance_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Open, JobStatus::InProgress)
                | (JobStatus::Open, JobStatus::Completed)
                | (JobStatus::InProgress, JobStatus::Completed)
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "bid_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
}

impl BidStatus {
    pub fn to_str(&self) -> &str {
        match self {
            BidStatus::Pending => "pending",
            BidStatus::Accepted => "accepted",
            BidStatus::Rejected => "rejected",
        }
    }

    /// Accepted and rejected are terminal; a bid never returns to pending.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BidStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub budget: BigDecimal,
    pub deadline: DateTime<Utc>,
    pub category: String,
    pub quantity: i32,
    pub status: JobStatus,
    pub is_remote: bool,
    pub radius_meters: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: Uuid,
    pub job_id: Uuid,
    pub bidder_id: Uuid,
    pub amount: BigDecimal,
    pub proposal_text: Option<String>,
    pub status: BidStatus,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub job_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_status_only_advances_forward() {
        assert!(JobStatus::Open.can_advance_to(JobStatus::InProgress));
        assert!(JobStatus::Open.can_advance_to(JobStatus::Completed));
        assert!(JobStatus::InProgress.can_advance_to(JobStatus::Completed));

        assert!(!JobStatus::InProgress.can_advance_to(JobStatus::Open));
        assert!(!JobStatus::Completed.can_advance_to(JobStatus::Open));
        assert!(!JobStatus::Completed.can_advance_to(JobStatus::InProgress));
        assert!(!JobStatus::Open.can_advance_to(JobStatus::Open));
    }

    #[test]
    fn status_strings_match_the_database_enums() {
        assert_eq!(JobStatus::InProgress.to_str(), "in_progress");
        assert_eq!(BidStatus::Pending.to_str(), "pending");
        assert_eq!(BidStatus::Accepted.to_str(), "accepted");
        assert_eq!(BidStatus::Rejected.to_str(), "rejected");
    }

    #[test]
    fn accepted_and_rejected_bids_are_terminal() {
        assert!(!BidStatus::Pending.is_terminal());
        assert!(BidStatus::Accepted.is_terminal());
        assert!(BidStatus::Rejected.is_terminal());
    }
}
