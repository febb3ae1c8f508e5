//! Change-feed delivery.
//!
//! [`ChangeBroadcaster`] subscribes to the event bus and forwards every
//! [`ChangeEvent`] as a JSON text frame to the WebSocket connections of the
//! organization it belongs to. Other tenants never see the frame.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;

use ghx_events::ChangeEvent;

use crate::ws::WsManager;

/// Routes change events to per-tenant WebSocket connections.
pub struct ChangeBroadcaster {
    ws_manager: Arc<WsManager>,
}

impl ChangeBroadcaster {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the delivery loop.
    ///
    /// Consumes events from the broadcast channel until it closes (i.e. the
    /// [`EventBus`](ghx_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<ChangeEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.deliver(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Change broadcaster lagged, events were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, change broadcaster shutting down");
                    break;
                }
            }
        }
    }

    /// Serialize one event and fan it out to its organization.
    async fn deliver(&self, event: &ChangeEvent) {
        let frame = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, entity = %event.entity, "Failed to serialize change event");
                return;
            }
        };

        let delivered = self
            .ws_manager
            .broadcast_to_org(event.organization_id, Message::Text(frame.into()))
            .await;

        tracing::debug!(
            entity = %event.entity,
            entity_id = %event.entity_id,
            delivered,
            "Change event delivered"
        );
    }
}
