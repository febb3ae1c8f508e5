//! Repository for the `purchase_orders` table.

use sqlx::PgPool;

use ghx_core::types::RecordId;

use crate::models::purchase_order::{
    CreatePurchaseOrder, PurchaseOrder, PurchaseOrderFilter, UpdatePurchaseOrder,
};

/// Column list for purchase_orders queries.
const COLUMNS: &str = "id, organization_id, project_id, order_number, vendor, description, \
    status, total_amount, currency, expected_delivery, version, created_by, updated_by, \
    created_at, updated_at";

/// Provides CRUD operations for purchase orders. All reads and writes are
/// scoped by organization id.
pub struct PurchaseOrderRepo;

impl PurchaseOrderRepo {
    /// Create a new purchase order, returning the created row.
    ///
    /// Order numbers are unique per organization; a duplicate insert fails
    /// with a unique-constraint violation on `uq_purchase_orders_org_number`.
    pub async fn create(
        pool: &PgPool,
        organization_id: RecordId,
        user_id: RecordId,
        input: &CreatePurchaseOrder,
    ) -> Result<PurchaseOrder, sqlx::Error> {
        let status = input.status.as_deref().unwrap_or("pending");
        let currency = input.currency.as_deref().unwrap_or("USD");
        let query = format!(
            "INSERT INTO purchase_orders
                (organization_id, project_id, order_number, vendor, description, status,
                 total_amount, currency, expected_delivery, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PurchaseOrder>(&query)
            .bind(organization_id)
            .bind(input.project_id)
            .bind(&input.order_number)
            .bind(&input.vendor)
            .bind(&input.description)
            .bind(status)
            .bind(input.total_amount)
            .bind(currency)
            .bind(input.expected_delivery)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a purchase order by id within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: RecordId,
        id: RecordId,
    ) -> Result<Option<PurchaseOrder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchase_orders WHERE id = $1 AND organization_id = $2"
        );
        sqlx::query_as::<_, PurchaseOrder>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List purchase orders matching the filter, newest first.
    /// Returns the page plus the total row count for the same filter.
    pub async fn list(
        pool: &PgPool,
        organization_id: RecordId,
        filter: &PurchaseOrderFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PurchaseOrder>, i64), sqlx::Error> {
        let mut conditions = vec!["organization_id = $1".to_string()];
        let mut next = 2;
        if filter.status.is_some() {
            conditions.push(format!("status = ${next}"));
            next += 1;
        }
        if filter.q.is_some() {
            conditions.push(format!(
                "(vendor ILIKE ${next} OR order_number ILIKE ${next})"
            ));
            next += 1;
        }
        if filter.from.is_some() {
            conditions.push(format!("expected_delivery >= ${next}"));
            next += 1;
        }
        if filter.to.is_some() {
            conditions.push(format!("expected_delivery <= ${next}"));
            next += 1;
        }
        let where_clause = conditions.join(" AND ");

        let count_query = format!("SELECT COUNT(*) FROM purchase_orders WHERE {where_clause}");
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
            "SELECT {COLUMNS} FROM purchase_orders WHERE {where_clause}
             ORDER BY created_at DESC
             LIMIT ${next} OFFSET ${}",
            next + 1
        );
        let mut page = sqlx::query_as::<_, PurchaseOrder>(&page_query).bind(organization_id);
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

    /// Update a purchase order if the caller's expected version matches.
    ///
    /// Returns `None` when no row matched the (id, organization, version)
    /// triple.
    pub async fn update(
        pool: &PgPool,
        organization_id: RecordId,
        id: RecordId,
        user_id: RecordId,
        input: &UpdatePurchaseOrder,
    ) -> Result<Option<PurchaseOrder>, sqlx::Error> {
        let query = format!(
            "UPDATE purchase_orders SET
                vendor = COALESCE($4, vendor),
                description = COALESCE($5, description),
                status = COALESCE($6, status),
                total_amount = COALESCE($7, total_amount),
                currency = COALESCE($8, currency),
                expected_delivery = COALESCE($9, expected_delivery),
                version = version + 1,
                updated_by = $3,
                updated_at = NOW()
             WHERE id = $1 AND organization_id = $2 AND version = $10
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PurchaseOrder>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(user_id)
            .bind(&input.vendor)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.total_amount)
            .bind(&input.currency)
            .bind(input.expected_delivery)
            .bind(input.version)
            .fetch_optional(pool)
            .await
    }

    /// Delete a purchase order by id. Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        organization_id: RecordId,
        id: RecordId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM purchase_orders WHERE id = $1 AND organization_id = $2")
                .bind(id)
                .bind(organization_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
