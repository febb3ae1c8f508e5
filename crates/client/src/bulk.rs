//! Bounded bulk operations with per-item outcomes.
//!
//! Bulk actions fan out one request per selected id through a bounded
//! worker pool. There is no atomicity across items, and that is the
//! visible contract: the caller gets a [`BulkReport`] listing every id as
//! succeeded or failed, with `succeeded + failed` always equal to the
//! number of requested ids.

use futures::stream::{self, StreamExt};

use ghx_core::types::RecordId;

use crate::remote::{ClientError, CollectionApi};

/// Default number of concurrently in-flight requests.
pub const DEFAULT_BULK_CONCURRENCY: usize = 8;

/// Per-item accounting for one bulk operation.
#[derive(Debug, Default)]
pub struct BulkReport {
    pub succeeded: Vec<RecordId>,
    pub failed: Vec<(RecordId, ClientError)>,
}

impl BulkReport {
    /// Total number of attempted items.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delete every id through at most `concurrency` parallel requests.
///
/// Completion order is unordered; each item's outcome is recorded
/// independently and nothing is retried. A partial failure leaves the
/// mixed state for the caller to surface.
pub async fn bulk_delete<A: CollectionApi>(
    api: &A,
    ids: &[RecordId],
    concurrency: usize,
) -> BulkReport {
    let concurrency = concurrency.max(1);

    let outcomes: Vec<(RecordId, Result<(), ClientError>)> = stream::iter(ids.iter().copied())
        .map(|id| async move { (id, api.delete(id).await) })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let mut report = BulkReport::default();
    for (id, outcome) in outcomes {
        match outcome {
            Ok(()) => report.succeeded.push(id),
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Bulk delete item failed");
                report.failed.push((id, e));
            }
        }
    }

    tracing::info!(
        total = report.total(),
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "Bulk delete finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use uuid::Uuid;

    use ghx_core::filter::FilterSet;

    use crate::remote::{ListPage, PageRequest};

    /// In-memory fake that fails for a chosen id set and tracks both the
    /// total call count and the concurrent in-flight high-water mark.
    struct FakeApi {
        fail_ids: HashSet<RecordId>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        high_water: Mutex<usize>,
    }

    impl FakeApi {
        fn failing(fail_ids: impl IntoIterator<Item = RecordId>) -> Self {
            Self {
                fail_ids: fail_ids.into_iter().collect(),
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                high_water: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl CollectionApi for FakeApi {
        type Item = serde_json::Value;
        type Create = serde_json::Value;
        type Update = serde_json::Value;

        async fn list(
            &self,
            _filters: &FilterSet,
            _page: PageRequest,
        ) -> Result<ListPage<Self::Item>, ClientError> {
            unimplemented!("not used by bulk delete")
        }

        async fn get(&self, _id: RecordId) -> Result<Option<Self::Item>, ClientError> {
            unimplemented!("not used by bulk delete")
        }

        async fn create(&self, _payload: &Self::Create) -> Result<Self::Item, ClientError> {
            unimplemented!("not used by bulk delete")
        }

        async fn update(
            &self,
            _id: RecordId,
            _payload: &Self::Update,
        ) -> Result<Self::Item, ClientError> {
            unimplemented!("not used by bulk delete")
        }

        async fn delete(&self, id: RecordId) -> Result<(), ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            {
                let mut high = self.high_water.lock().unwrap();
                *high = (*high).max(now);
            }

            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_ids.contains(&id) {
                Err(ClientError::Api {
                    status: 500,
                    code: "INTERNAL_ERROR".to_string(),
                    message: "boom".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn issues_exactly_one_call_per_id_and_accounts_for_all() {
        let ids: Vec<RecordId> = (0..10).map(|_| Uuid::new_v4()).collect();
        let api = FakeApi::failing([ids[2], ids[7]]);

        let report = bulk_delete(&api, &ids, 4).await;

        assert_eq!(api.calls.load(Ordering::SeqCst), 10);
        assert_eq!(report.total(), 10);
        assert_eq!(report.succeeded.len() + report.failed.len(), ids.len());
        assert_eq!(report.failed.len(), 2);
        assert!(!report.all_succeeded());
        assert_matches!(report.failed[0].1, ClientError::Api { status: 500, .. });
    }

    #[tokio::test]
    async fn in_flight_requests_never_exceed_the_bound() {
        let ids: Vec<RecordId> = (0..12).map(|_| Uuid::new_v4()).collect();
        let api = FakeApi::failing([]);

        bulk_delete(&api, &ids, 3).await;

        assert!(*api.high_water.lock().unwrap() <= 3);
    }

    #[tokio::test]
    async fn empty_id_list_is_a_clean_no_op() {
        let api = FakeApi::failing([]);
        let report = bulk_delete(&api, &[], DEFAULT_BULK_CONCURRENCY).await;

        assert_eq!(report.total(), 0);
        assert!(report.all_succeeded());
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }
}
