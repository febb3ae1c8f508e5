//! Repository for the `call_sheets` table.

use sqlx::types::Json;
use sqlx::PgPool;

use ghx_core::types::RecordId;

use crate::models::call_sheet::{CallSheet, CallSheetFilter, CreateCallSheet, UpdateCallSheet};

/// Column list for call_sheets queries.
const COLUMNS: &str = "id, organization_id, project_id, event_id, name, description, status, \
    call_date, call_time, location, crew_calls, talent_calls, emergency_contacts, \
    version, created_by, updated_by, created_at, updated_at";

/// Provides CRUD operations for call sheets. All reads and writes are
/// scoped by organization id.
pub struct CallSheetRepo;

impl CallSheetRepo {
    /// Create a new call sheet, returning the created row.
    pub async fn create(
        pool: &PgPool,
        organization_id: RecordId,
        user_id: RecordId,
        input: &CreateCallSheet,
    ) -> Result<CallSheet, sqlx::Error> {
        let status = input.status.as_deref().unwrap_or("draft");
        let query = format!(
            "INSERT INTO call_sheets
                (organization_id, project_id, event_id, name, description, status,
                 call_date, call_time, location, crew_calls, talent_calls,
                 emergency_contacts, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CallSheet>(&query)
            .bind(organization_id)
            .bind(input.project_id)
            .bind(input.event_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(status)
            .bind(input.call_date)
            .bind(&input.call_time)
            .bind(&input.location)
            .bind(Json(&input.crew_calls))
            .bind(Json(&input.talent_calls))
            .bind(Json(&input.emergency_contacts))
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a call sheet by id within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: RecordId,
        id: RecordId,
    ) -> Result<Option<CallSheet>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM call_sheets WHERE id = $1 AND organization_id = $2");
        sqlx::query_as::<_, CallSheet>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List call sheets matching the filter, newest call date first.
    /// Returns the page plus the total row count for the same filter.
    pub async fn list(
        pool: &PgPool,
        organization_id: RecordId,
        filter: &CallSheetFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<CallSheet>, i64), sqlx::Error> {
        let mut conditions = vec!["organization_id = $1".to_string()];
        let mut next = 2;
        if filter.status.is_some() {
            conditions.push(format!("status = ${next}"));
            next += 1;
        }
        if filter.q.is_some() {
            conditions.push(format!("name ILIKE ${next}"));
            next += 1;
        }
        if filter.from.is_some() {
            conditions.push(format!("call_date >= ${next}"));
            next += 1;
        }
        if filter.to.is_some() {
            conditions.push(format!("call_date <= ${next}"));
            next += 1;
        }
        let where_clause = conditions.join(" AND ");

        let count_query = format!("SELECT COUNT(*) FROM call_sheets WHERE {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query).bind(organization_id);
        if let Some(status) = &filter.status {
            count = count.bind(status);
        }
        if let Some(q) = &filter.q {
            count = count.bind(format!("%{q}%"));
        }
        if let Some(from) = filter.from {
            count = count.bind(from);
        }
        if let Some(to) = filter.to {
            count = count.bind(to);
        }
        let total = count.fetch_one(pool).await?;

        let page_query = format!(
            "SELECT {COLUMNS} FROM call_sheets WHERE {where_clause}
             ORDER BY call_date DESC, created_at DESC
             LIMIT ${next} OFFSET ${}",
            next + 1
        );
        let mut page = sqlx::query_as::<_, CallSheet>(&page_query).bind(organization_id);
        if let Some(status) = &filter.status {
            page = page.bind(status);
        }
        if let Some(q) = &filter.q {
            page = page.bind(format!("%{q}%"));
        }
        if let Some(from) = filter.from {
            page = page.bind(from);
        }
        if let Some(to) = filter.to {
            page = page.bind(to);
        }
        let items = page.bind(limit).bind(offset).fetch_all(pool).await?;

        Ok((items, total))
    }

    /// Update a call sheet if the caller's expected version matches.
    ///
    /// Returns `None` when no row matched the (id, organization, version)
    /// triple; the caller distinguishes a missing row from a stale version
    /// by probing [`find_by_id`](Self::find_by_id).
    pub async fn update(
        pool: &PgPool,
        organization_id: RecordId,
        id: RecordId,
        user_id: RecordId,
        input: &UpdateCallSheet,
    ) -> Result<Option<CallSheet>, sqlx::Error> {
        let query = format!(
            "UPDATE call_sheets SET
                name = COALESCE($4, name),
                description = COALESCE($5, description),
                status = COALESCE($6, status),
                call_date = COALESCE($7, call_date),
                call_time = COALESCE($8, call_time),
                location = COALESCE($9, location),
                crew_calls = COALESCE($10, crew_calls),
                talent_calls = COALESCE($11, talent_calls),
                emergency_contacts = COALESCE($12, emergency_contacts),
                version = version + 1,
                updated_by = $3,
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2 AND version = $13
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CallSheet>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.call_date)
            .bind(&input.call_time)
            .bind(&input.location)
            .bind(input.crew_calls.as_ref().map(Json))
            .bind(input.talent_calls.as_ref().map(Json))
            .bind(input.emergency_contacts.as_ref().map(Json))
            .bind(input.version)
            .fetch_optional(pool)
            .await
    }

    /// Delete a call sheet by id. Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        organization_id: RecordId,
        id: RecordId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM call_sheets WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
