//! Shared response envelope types for API handlers.
//!
//! Single-record responses use a `{ "data": ... }` envelope; list responses
//! add the total row count for the active filter. Use these instead of
//! ad-hoc `serde_json::json!` so serialization stays consistent.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Standard `{ "data": [...], "total": n }` list envelope.
///
/// `total` counts every row matching the filter, not just this page.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
}
