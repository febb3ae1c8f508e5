//! Shared query parameter types for API handlers.
//!
//! Parameter names are the canonical ones `FilterSet::to_query_pairs`
//! produces on the client side: `status`, `q`, `from`, `to`, plus paging.

use chrono::NaiveDate;
use serde::Deserialize;

/// Common list parameters (`?status=&q=&from=&to=&limit=&offset=`).
///
/// Used by every module whose primary date is a single column. Values are
/// clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    /// Case-insensitive substring search.
    pub q: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
