//! Analytics overview aggregates.
//!
//! Computed by SQL in `OverviewRepo`, never by iterating fetched rows.

use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// Row count for a single status value.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Per-module record counts.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ModuleOverview {
    pub total: i64,
    pub by_status: Vec<StatusCount>,
}

/// Procurement counts plus spend aggregates.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ProcurementOverview {
    pub total: i64,
    pub by_status: Vec<StatusCount>,
    pub total_amount: f64,
    pub average_amount: f64,
}

/// The full overview payload for one organization.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct OverviewSummary {
    pub call_sheets: ModuleOverview,
    /// Call sheets dated today or later.
    pub upcoming_call_sheets: i64,
    pub purchase_orders: ProcurementOverview,
    pub itineraries: ModuleOverview,
    pub lineups: ModuleOverview,
}
