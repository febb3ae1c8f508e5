//! Repository for the `users` table.

use sqlx::PgPool;

use ghx_core::types::RecordId;

use crate::models::user::User;

/// Column list for users queries.
const COLUMNS: &str =
    "id, organization_id, email, full_name, role, password_hash, created_at, updated_at";

/// Provides lookups and inserts for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with an already-hashed password, returning the row.
    pub async fn create(
        pool: &PgPool,
        organization_id: RecordId,
        email: &str,
        full_name: &str,
        role: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (organization_id, email, full_name, role, password_hash)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(organization_id)
            .bind(email)
            .bind(full_name)
            .bind(role)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: RecordId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (login lookup). Emails are globally unique.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
