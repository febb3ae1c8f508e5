//! Typed REST client for one server-side collection.
//!
//! [`RemoteCollection`] speaks the platform's conventional REST surface
//! (`GET/POST /{module}`, `GET/PATCH/DELETE /{module}/{id}`) and unwraps the
//! standard `{ "data": ... }` / `{ "data": ..., "total": ... }` envelopes.
//! The [`CollectionApi`] trait fronts it so drawers and bulk operations can
//! be driven against an in-memory fake in tests; nothing in this crate
//! reaches for a hidden singleton client.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use ghx_core::filter::FilterSet;
use ghx_core::types::RecordId;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Client-side error taxonomy.
///
/// Nothing is retried automatically; callers decide whether to surface or
/// resubmit.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a usable HTTP response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 409 from a stale versioned update. `provided`/`current` carry the
    /// version numbers when the server included them.
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        provided: Option<i32>,
        current: Option<i32>,
    },

    /// Any other non-success response, classified by the server's error code.
    #[error("API error ({status} {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

/// The server's `{ "error": ..., "code": ... }` error body.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    code: String,
    provided: Option<i32>,
    current: Option<i32>,
}

// ---------------------------------------------------------------------------
// Envelopes and paging
// ---------------------------------------------------------------------------

/// One page of a listed collection.
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Total rows matching the filter, beyond this page.
    pub total: i64,
}

/// Limit/offset paging parameters; the server clamps them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRequest {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    data: Vec<T>,
    total: i64,
}

// ---------------------------------------------------------------------------
// CollectionApi
// ---------------------------------------------------------------------------

/// The collection contract drawers, stores, and bulk operations depend on.
///
/// Implemented by [`RemoteCollection`] for production and by in-memory
/// fakes in tests.
#[async_trait]
pub trait CollectionApi: Send + Sync {
    type Item: Send;
    type Create: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;

    /// List records matching `filters`, returning one page plus the total.
    async fn list(
        &self,
        filters: &FilterSet,
        page: PageRequest,
    ) -> Result<ListPage<Self::Item>, ClientError>;

    /// Fetch one record; a missing id is `Ok(None)`, not an error.
    async fn get(&self, id: RecordId) -> Result<Option<Self::Item>, ClientError>;

    /// Create a record; the server assigns id, version, and timestamps.
    async fn create(&self, payload: &Self::Create) -> Result<Self::Item, ClientError>;

    /// Partially update a record. The payload carries the expected version;
    /// a stale version yields [`ClientError::Conflict`].
    async fn update(&self, id: RecordId, payload: &Self::Update)
        -> Result<Self::Item, ClientError>;

    /// Delete a record by id.
    async fn delete(&self, id: RecordId) -> Result<(), ClientError>;
}

// ---------------------------------------------------------------------------
// RemoteCollection
// ---------------------------------------------------------------------------

/// REST client for one module's collection endpoints.
///
/// The tenant is implicit in the bearer token; the client never sends an
/// organization id explicitly.
pub struct RemoteCollection<T, C, U> {
    http: reqwest::Client,
    /// API root, e.g. `https://app.example.com/api/v1`.
    base_url: String,
    /// Module path segment, e.g. `call-sheets`.
    module: &'static str,
    bearer_token: String,
    _marker: PhantomData<fn() -> (T, C, U)>,
}

impl<T, C, U> RemoteCollection<T, C, U> {
    /// Build a client for one module. The `http` handle is injected so the
    /// application owns connection pooling and timeouts.
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        module: &'static str,
        bearer_token: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            module,
            bearer_token: bearer_token.into(),
            _marker: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.module)
    }

    fn record_url(&self, id: RecordId) -> String {
        format!("{}/{}/{id}", self.base_url, self.module)
    }

    /// Turn a non-success response into a typed error, logging it at the
    /// call site as the platform convention requires.
    async fn classify_failure(
        &self,
        operation: &'static str,
        response: reqwest::Response,
    ) -> ClientError {
        let status = response.status().as_u16();
        let body: Option<ApiErrorBody> = response.json().await.ok();

        let error = match body {
            Some(body) if body.code == "CONFLICT" => ClientError::Conflict {
                message: body.error,
                provided: body.provided,
                current: body.current,
            },
            Some(body) => ClientError::Api {
                status,
                code: body.code,
                message: body.error,
            },
            None => ClientError::Api {
                status,
                code: "UNKNOWN".to_string(),
                message: "Response body was not a recognised error envelope".to_string(),
            },
        };

        tracing::error!(
            module = self.module,
            operation,
            status,
            error = %error,
            "Collection request failed"
        );
        error
    }
}

#[async_trait]
impl<T, C, U> CollectionApi for RemoteCollection<T, C, U>
where
    T: DeserializeOwned + Send + Sync,
    C: Serialize + Send + Sync,
    U: Serialize + Send + Sync,
{
    type Item = T;
    type Create = C;
    type Update = U;

    async fn list(
        &self,
        filters: &FilterSet,
        page: PageRequest,
    ) -> Result<ListPage<T>, ClientError> {
        let mut query = filters.to_query_pairs();
        if let Some(limit) = page.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = page.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }

        let response = self
            .http
            .get(self.collection_url())
            .bearer_auth(&self.bearer_token)
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.classify_failure("list", response).await);
        }

        let envelope: ListEnvelope<T> = response.json().await?;
        Ok(ListPage {
            items: envelope.data,
            total: envelope.total,
        })
    }

    async fn get(&self, id: RecordId) -> Result<Option<T>, ClientError> {
        let response = self
            .http
            .get(self.record_url(id))
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(self.classify_failure("get", response).await);
        }

        let envelope: DataEnvelope<T> = response.json().await?;
        Ok(Some(envelope.data))
    }

    async fn create(&self, payload: &C) -> Result<T, ClientError> {
        let response = self
            .http
            .post(self.collection_url())
            .bearer_auth(&self.bearer_token)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.classify_failure("create", response).await);
        }

        let envelope: DataEnvelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    async fn update(&self, id: RecordId, payload: &U) -> Result<T, ClientError> {
        let response = self
            .http
            .patch(self.record_url(id))
            .bearer_auth(&self.bearer_token)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.classify_failure("update", response).await);
        }

        let envelope: DataEnvelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    async fn delete(&self, id: RecordId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.record_url(id))
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.classify_failure("delete", response).await);
        }
        Ok(())
    }
}
