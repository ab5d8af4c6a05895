// dtos/jobdtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateJobDto {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(
        min = 10,
        max = 2000,
        message = "Description must be between 10 and 2000 characters"
    ))]
    pub description: String,

    #[validate(range(min = 1.0, message = "Budget must be greater than 0"))]
    pub budget: f64,

    pub deadline: DateTime<Utc>,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(range(min = 1, max = 50, message = "Quantity must be between 1 and 50"))]
    pub quantity: i32,

    #[serde(default)]
    pub is_remote: bool,

    pub lat: Option<f64>,
    pub lng: Option<f64>,

    #[validate(range(min = 100, max = 100000, message = "Radius must be between 100m and 100km"))]
    pub radius_meters: Option<i32>,
}

impl CreateJobDto {
    /// PostGIS wants POINT(longitude latitude).
    pub fn location_wkt(&self) -> Option<String> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(format!("POINT({} {})", lng, lat)),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct PlaceBidDto {
    #[validate(range(min = 0.01, message = "Please enter a valid amount"))]
    pub amount: f64,

    #[validate(length(max = 2000, message = "Proposal must be at most 2000 characters"))]
    pub proposal_text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ReviewEntryDto {
    pub provider_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CompleteJobDto {
    #[serde(default)]
    #[validate]
    pub reviews: Vec<ReviewEntryDto>,
}

#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    pub category: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_job() -> CreateJobDto {
        CreateJobDto {
            title: "Fix kitchen tap".to_string(),
            description: "The kitchen tap leaks and needs a new washer.".to_string(),
            budget: 500.0,
            deadline: Utc::now() + chrono::Duration::days(7),
            category: "plumbing".to_string(),
            quantity: 1,
            is_remote: false,
            lat: Some(19.076),
            lng: Some(72.8777),
            radius_meters: Some(5000),
        }
    }

    #[test]
    fn accepts_a_valid_job() {
        assert!(valid_job().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_budget() {
        let mut job = valid_job();
        job.budget = 0.0;
        assert!(job.validate().is_err());
    }

    #[test]
    fn rejects_zero_quantity() {
        let mut job = valid_job();
        job.quantity = 0;
        assert!(job.validate().is_err());
    }

    #[test]
    fn location_wkt_is_lng_lat_ordered() {
        assert_eq!(
            valid_job().location_wkt().as_deref(),
            Some("POINT(72.8777 19.076)")
        );
    }

    #[test]
    fn location_wkt_requires_both_coordinates() {
        let mut job = valid_job();
        job.lng = None;
        assert!(job.location_wkt().is_none());
    }

    #[test]
    fn rejects_non_positive_bid_amount() {
        let bid = PlaceBidDto {
            amount: 0.0,
            proposal_text: None,
        };
        assert!(bid.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_rating() {
        for rating in [0, 6] {
            let dto = CompleteJobDto {
                reviews: vec![ReviewEntryDto {
                    provider_id: Uuid::nil(),
                    rating,
                    comment: None,
                }],
            };
            assert!(dto.validate().is_err(), "rating {} should fail", rating);
        }
    }

    #[test]
    fn empty_reviews_are_allowed() {
        let dto = CompleteJobDto { reviews: vec![] };
        assert!(dto.validate().is_ok());
    }
}
