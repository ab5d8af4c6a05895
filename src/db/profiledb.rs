// db/profiledb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::profilemodel::{Profile, ProviderLocation, UserRole};

#[async_trait]
pub trait ProfileExt {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, Error>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        full_name: Option<String>,
        avatar_url: Option<String>,
        role: Option<UserRole>,
        preferences: Option<serde_json::Value>,
    ) -> Result<Profile, Error>;

    async fn add_provider_location(
        &self,
        provider_id: Uuid,
        location_wkt: String,
        radius_meters: i32,
    ) -> Result<ProviderLocation, Error>;

    async fn get_provider_locations(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<ProviderLocation>, Error>;

    /// Scoped to the owning provider; deleting someone else's zone is a no-op.
    async fn delete_provider_location(
        &self,
        zone_id: Uuid,
        provider_id: Uuid,
    ) -> Result<u64, Error>;
}

#[async_trait]
impl ProfileExt for DBClient {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, Error> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, full_name, avatar_url, role, preferences, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        full_name: Option<String>,
        avatar_url: Option<String>,
        role: Option<UserRole>,
        preferences: Option<serde_json::Value>,
    ) -> Result<Profile, Error> {
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET full_name = COALESCE($2, full_name),
                avatar_url = COALESCE($3, avatar_url),
                role = COALESCE($4, role),
                preferences = COALESCE($5, preferences),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, full_name, avatar_url, role, preferences, updated_at
            "#,
        )
        .bind(user_id)
        .bind(full_name)
        .bind(avatar_url)
        .bind(role)
        .bind(preferences)
        .fetch_one(&self.pool)
        .await
    }

    async fn add_provider_location(
        &self,
        provider_id: Uuid,
        location_wkt: String,
        radius_meters: i32,
    ) -> Result<ProviderLocation, Error> {
        sqlx::query_as::<_, ProviderLocation>(
            r#"
            INSERT INTO provider_locations (provider_id, location, radius_meters)
            VALUES ($1, ST_GeographyFromText($2), $3)
            RETURNING id, provider_id, ST_AsText(location::geometry) AS location,
                      radius_meters, created_at
            "#,
        )
        .bind(provider_id)
        .bind(location_wkt)
        .bind(radius_meters)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_provider_locations(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<ProviderLocation>, Error> {
        sqlx::query_as::<_, ProviderLocation>(
            r#"
            SELECT id, provider_id, ST_AsText(location::geometry) AS location,
                   radius_meters, created_at
            FROM provider_locations
            WHERE provider_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_provider_location(
        &self,
        zone_id: Uuid,
        provider_id: Uuid,
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM provider_locations
            WHERE id = $1 AND provider_id = $2
            "#,
        )
        .bind(zone_id)
        .bind(provider_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
