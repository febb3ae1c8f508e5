//! Repository for the `organizations` table.

use sqlx::PgPool;

use ghx_core::types::RecordId;

use crate::models::organization::{CreateOrganization, Organization};

/// Column list for organizations queries.
const COLUMNS: &str = "id, name, slug, created_at";

/// Provides CRUD operations for organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Create a new organization, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrganization,
    ) -> Result<Organization, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizations (name, slug) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    /// Find an organization by its id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: RecordId,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE id = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an organization by its URL slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE slug = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }
}
