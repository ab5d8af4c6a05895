// models/profilemodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Seeker,
    Provider,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Seeker => "seeker",
            UserRole::Provider => "provider",
        }
    }
}

/// Account rows themselves live with the auth provider; this table only holds
/// the app-facing profile keyed by the same id.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub preferences: Option<serde_json::Value>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A provider's declared service zone. The point is PostGIS geography; we keep
/// it as WKT text on this side and let the database do all distance math.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProviderLocation {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub location: String,
    pub radius_meters: i32,
    pub created_at: Option<DateTime<Utc>>,
}
