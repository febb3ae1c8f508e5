//! Repository for the `activities` table.

use sqlx::PgPool;

use ghx_core::types::RecordId;

use crate::models::activity::{Activity, NewActivity};

/// Column list for activities queries.
const COLUMNS: &str =
    "id, organization_id, user_id, entity, entity_id, action, detail, created_at";

/// Provides inserts and listing for the activity log.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a new activity row, returning it.
    pub async fn create(pool: &PgPool, input: &NewActivity) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (organization_id, user_id, entity, entity_id, action, detail)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(input.organization_id)
            .bind(input.user_id)
            .bind(&input.entity)
            .bind(input.entity_id)
            .bind(&input.action)
            .bind(&input.detail)
            .fetch_one(pool)
            .await
    }

    /// List recent activity for an organization, newest first.
    pub async fn list(
        pool: &PgPool,
        organization_id: RecordId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities
             WHERE organization_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(organization_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
