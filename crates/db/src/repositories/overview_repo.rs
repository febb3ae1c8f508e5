//! Aggregate queries backing the analytics overview.
//!
//! All statistics are computed in SQL; nothing here fetches rows to count
//! them in memory.

use sqlx::PgPool;

use ghx_core::types::RecordId;

use crate::models::overview::{
    ModuleOverview, OverviewSummary, ProcurementOverview, StatusCount,
};

/// Spend aggregates for purchase orders.
#[derive(Debug, sqlx::FromRow)]
struct SpendRow {
    total: i64,
    total_amount: f64,
    average_amount: f64,
}

/// Computes per-organization overview aggregates.
pub struct OverviewRepo;

impl OverviewRepo {
    /// Assemble the full overview for one organization.
    pub async fn summary(
        pool: &PgPool,
        organization_id: RecordId,
    ) -> Result<OverviewSummary, sqlx::Error> {
        let call_sheets = Self::module_counts(pool, "call_sheets", organization_id).await?;
        let upcoming_call_sheets = Self::upcoming_call_sheets(pool, organization_id).await?;
        let purchase_orders = Self::procurement(pool, organization_id).await?;
        let itineraries = Self::module_counts(pool, "itineraries", organization_id).await?;
        let lineups = Self::module_counts(pool, "lineups", organization_id).await?;

        Ok(OverviewSummary {
            call_sheets,
            upcoming_call_sheets,
            purchase_orders,
            itineraries,
            lineups,
        })
    }

    /// Total row count and per-status counts for one module table.
    ///
    /// `table` is always one of the fixed module table names; it is never
    /// caller-supplied input.
    async fn module_counts(
        pool: &PgPool,
        table: &str,
        organization_id: RecordId,
    ) -> Result<ModuleOverview, sqlx::Error> {
        let query = format!(
            "SELECT status, COUNT(*) AS count FROM {table}
             WHERE organization_id = $1
             GROUP BY status
             ORDER BY status"
        );
        let by_status = sqlx::query_as::<_, StatusCount>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await?;
        let total = by_status.iter().map(|s| s.count).sum();
        Ok(ModuleOverview { total, by_status })
    }

    /// Count call sheets dated today or later.
    async fn upcoming_call_sheets(
        pool: &PgPool,
        organization_id: RecordId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM call_sheets
             WHERE organization_id = $1 AND call_date >= CURRENT_DATE",
        )
        .bind(organization_id)
        .fetch_one(pool)
        .await
    }

    /// Procurement counts plus spend total/average.
    async fn procurement(
        pool: &PgPool,
        organization_id: RecordId,
    ) -> Result<ProcurementOverview, sqlx::Error> {
        let counts = Self::module_counts(pool, "purchase_orders", organization_id).await?;
        let spend = sqlx::query_as::<_, SpendRow>(
            "SELECT COUNT(*) AS total,
                    COALESCE(SUM(total_amount), 0)::DOUBLE PRECISION AS total_amount,
                    COALESCE(AVG(total_amount), 0)::DOUBLE PRECISION AS average_amount
             FROM purchase_orders
             WHERE organization_id = $1",
        )
        .bind(organization_id)
        .fetch_one(pool)
        .await?;

        Ok(ProcurementOverview {
            total: spend.total,
            by_status: counts.by_status,
            total_amount: spend.total_amount,
            average_amount: spend.average_amount,
        })
    }
}
