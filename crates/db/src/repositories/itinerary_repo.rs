//! Repository for the `itineraries` table.

use sqlx::PgPool;

use ghx_core::types::RecordId;

use crate::models::itinerary::{CreateItinerary, Itinerary, ItineraryFilter, UpdateItinerary};

/// Column list for itineraries queries.
const COLUMNS: &str = "id, organization_id, event_id, name, description, status, start_date, \
    end_date, location, transport_mode, version, created_by, updated_by, created_at, updated_at";

/// Provides CRUD operations for itineraries. All reads and writes are
/// scoped by organization id.
pub struct ItineraryRepo;

impl ItineraryRepo {
    /// Create a new itinerary, returning the created row.
    pub async fn create(
        pool: &PgPool,
        organization_id: RecordId,
        user_id: RecordId,
        input: &CreateItinerary,
    ) -> Result<Itinerary, sqlx::Error> {
        let status = input.status.as_deref().unwrap_or("draft");
        let query = format!(
            "INSERT INTO itineraries
                (organization_id, event_id, name, description, status, start_date,
                 end_date, location, transport_mode, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Itinerary>(&query)
            .bind(organization_id)
            .bind(input.event_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(status)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.location)
            .bind(&input.transport_mode)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find an itinerary by id within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: RecordId,
        id: RecordId,
    ) -> Result<Option<Itinerary>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM itineraries WHERE id = $1 AND organization_id = $2");
        sqlx::query_as::<_, Itinerary>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List itineraries matching the filter, earliest start date first.
    /// Returns the page plus the total row count for the same filter.
    ///
    /// The `overlaps` filter keeps rows whose `[start_date, end_date]`
    /// intersects the given range (inclusive on both ends).
    pub async fn list(
        pool: &PgPool,
        organization_id: RecordId,
        filter: &ItineraryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Itinerary>, i64), sqlx::Error> {
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
            conditions.push(format!("start_date >= ${next}"));
            next += 1;
        }
        if filter.to.is_some() {
            conditions.push(format!("start_date <= ${next}"));
            next += 1;
        }
        if filter.overlaps.is_some() {
            conditions.push(format!(
                "start_date <= ${} AND end_date >= ${next}",
                next + 1
            ));
            next += 2;
        }
        let where_clause = conditions.join(" AND ");

        let count_query = format!("SELECT COUNT(*) FROM itineraries WHERE {where_clause}");
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
        if let Some((start, end)) = filter.overlaps {
            count = count.bind(start).bind(end);
        }
        let total = count.fetch_one(pool).await?;

        let page_query = format!(
            "SELECT {COLUMNS} FROM itineraries WHERE {where_clause}
             ORDER BY start_date ASC, created_at DESC
             LIMIT ${next} OFFSET ${}",
            next + 1
        );
        let mut page = sqlx::query_as::<_, Itinerary>(&page_query).bind(organization_id);
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
        if let Some((start, end)) = filter.overlaps {
            page = page.bind(start).bind(end);
        }
        let items = page.bind(limit).bind(offset).fetch_all(pool).await?;

        Ok((items, total))
    }

    /// Update an itinerary if the caller's expected version matches.
    ///
    /// Returns `None` when no row matched the (id, organization, version)
    /// triple.
    pub async fn update(
        pool: &PgPool,
        organization_id: RecordId,
        id: RecordId,
        user_id: RecordId,
        input: &UpdateItinerary,
    ) -> Result<Option<Itinerary>, sqlx::Error> {
        let query = format!(
            "UPDATE itineraries SET
                name = COALESCE($4, name),
                description = COALESCE($5, description),
                status = COALESCE($6, status),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date),
                location = COALESCE($9, location),
                transport_mode = COALESCE($10, transport_mode),
                version = version + 1,
                updated_by = $3,
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2 AND version = $11
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Itinerary>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.location)
            .bind(&input.transport_mode)
            .bind(input.version)
            .fetch_optional(pool)
            .await
    }

    /// Delete an itinerary by id. Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        organization_id: RecordId,
        id: RecordId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM itineraries WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
