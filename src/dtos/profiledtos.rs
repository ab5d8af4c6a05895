// dtos/profiledtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::profilemodel::UserRole;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub full_name: Option<String>,

    #[validate(url(message = "Invalid avatar URL"))]
    pub avatar_url: Option<String>,

    pub role: Option<UserRole>,

    pub preferences: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AddZoneDto {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub lng: f64,

    #[validate(range(min = 100, max = 100000, message = "Radius must be between 100m and 100km"))]
    pub radius_meters: i32,
}

impl AddZoneDto {
    pub fn location_wkt(&self) -> String {
        format!("POINT({} {})", self.lng, self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_wkt_is_lng_lat_ordered() {
        let zone = AddZoneDto {
            lat: 28.6139,
            lng: 77.209,
            radius_meters: 3000,
        };
        assert_eq!(zone.location_wkt(), "POINT(77.209 28.6139)");
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let zone = AddZoneDto {
            lat: 95.0,
            lng: 77.209,
            radius_meters: 3000,
        };
        assert!(zone.validate().is_err());
    }
}
