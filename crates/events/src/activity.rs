//! Best-effort activity logging service.
//!
//! [`ActivityLogger`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! broadcast channel and records each received [`ChangeEvent`] in the
//! `activities` table. Activity logging is a non-critical path: a failed
//! write is logged and dropped, and never affects the mutating request.

use tokio::sync::broadcast;

use ghx_db::models::activity::NewActivity;
use ghx_db::repositories::ActivityRepo;
use ghx_db::DbPool;

use crate::bus::{ChangeEvent, ChangeKind};

/// Background service that records change events as activity rows.
pub struct ActivityLogger;

impl ActivityLogger {
    /// Run the logging loop.
    ///
    /// Subscribes to the event bus via the provided `receiver` and records
    /// every event it receives. The loop exits when the channel is closed
    /// (i.e. the [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<ChangeEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::record(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            entity = %event.entity,
                            entity_id = %event.entity_id,
                            "Failed to record activity"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Activity logger lagged, events were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, activity logger shutting down");
                    break;
                }
            }
        }
    }

    /// Write one activity row for a change event.
    async fn record(pool: &DbPool, event: &ChangeEvent) -> Result<(), sqlx::Error> {
        let action = match event.kind {
            ChangeKind::Insert => "created",
            ChangeKind::Update => "updated",
            ChangeKind::Delete => "deleted",
        };

        ActivityRepo::create(
            pool,
            &NewActivity {
                organization_id: event.organization_id,
                user_id: event.actor_user_id,
                entity: event.entity.clone(),
                entity_id: event.entity_id,
                action: action.to_string(),
                detail: event.new.clone().unwrap_or(serde_json::Value::Null),
            },
        )
        .await?;

        Ok(())
    }
}
