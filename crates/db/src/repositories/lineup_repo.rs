//! Repository for the `lineups` table.

use sqlx::PgPool;

use ghx_core::types::RecordId;

use crate::models::lineup::{CreateLineup, Lineup, LineupFilter, UpdateLineup};

/// Column list for lineups queries.
const COLUMNS: &str = "id, organization_id, event_id, name, performer, stage, status, \
    performance_date, set_start, set_end, version, created_by, updated_by, \
    created_at, updated_at";

/// Provides CRUD operations for lineups. All reads and writes are scoped
/// by organization id.
pub struct LineupRepo;

impl LineupRepo {
    /// Create a new lineup entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        organization_id: RecordId,
        user_id: RecordId,
        input: &CreateLineup,
    ) -> Result<Lineup, sqlx::Error> {
        let status = input.status.as_deref().unwrap_or("tentative");
        let query = format!(
            "INSERT INTO lineups
                (organization_id, event_id, name, performer, stage, status,
                 performance_date, set_start, set_end, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lineup>(&query)
            .bind(organization_id)
            .bind(input.event_id)
            .bind(&input.name)
            .bind(&input.performer)
            .bind(&input.stage)
            .bind(status)
            .bind(input.performance_date)
            .bind(&input.set_start)
            .bind(&input.set_end)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a lineup entry by id within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: RecordId,
        id: RecordId,
    ) -> Result<Option<Lineup>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM lineups WHERE id = $1 AND organization_id = $2");
        sqlx::query_as::<_, Lineup>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List lineup entries matching the filter, ordered by performance date
    /// then set start. Returns the page plus the total row count for the
    /// same filter.
    pub async fn list(
        pool: &PgPool,
        organization_id: RecordId,
        filter: &LineupFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Lineup>, i64), sqlx::Error> {
        let mut conditions = vec!["organization_id = $1".to_string()];
        let mut next = 2;
        if filter.status.is_some() {
            conditions.push(format!("status = ${next}"));
            next += 1;
        }
        if filter.q.is_some() {
            conditions.push(format!("(name ILIKE ${next} OR performer ILIKE ${next})"));
            next += 1;
        }
        if filter.from.is_some() {
            conditions.push(format!("performance_date >= ${next}"));
            next += 1;
        }
        if filter.to.is_some() {
            conditions.push(format!("performance_date <= ${next}"));
            next += 1;
        }
        let where_clause = conditions.join(" AND ");

        let count_query = format!("SELECT COUNT(*) FROM lineups WHERE {where_clause}");
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
            "SELECT {COLUMNS} FROM lineups WHERE {where_clause}
             ORDER BY performance_date ASC, set_start ASC NULLS LAST
             LIMIT ${next} OFFSET ${}",
            next + 1
        );
        let mut page = sqlx::query_as::<_, Lineup>(&page_query).bind(organization_id);
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

    /// Update a lineup entry if the caller's expected version matches.
    ///
    /// Returns `None` when no row matched the (id, organization, version)
    /// triple.
    pub async fn update(
        pool: &PgPool,
        organization_id: RecordId,
        id: RecordId,
        user_id: RecordId,
        input: &UpdateLineup,
    ) -> Result<Option<Lineup>, sqlx::Error> {
        let query = format!(
            "UPDATE lineups SET
                name = COALESCE($4, name),
                performer = COALESCE($5, performer),
                stage = COALESCE($6, stage),
                status = COALESCE($7, status),
                performance_date = COALESCE($8, performance_date),
                set_start = COALESCE($9, set_start),
                set_end = COALESCE($10, set_end),
                version = version + 1,
                updated_by = $3,
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2 AND version = $11
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lineup>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.performer)
            .bind(&input.stage)
            .bind(&input.status)
            .bind(input.performance_date)
            .bind(&input.set_start)
            .bind(&input.set_end)
            .bind(input.version)
            .fetch_optional(pool)
            .await
    }

    /// Delete a lineup entry by id. Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        organization_id: RecordId,
        id: RecordId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lineups WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
