//! Live change-feed consumer.
//!
//! Connects to the backend WebSocket endpoint and delivers row-level
//! [`ChangeMessage`]s to the caller. The feed carries no sequence numbers,
//! so a dropped connection can silently skip events; the listener therefore
//! fires `on_reconnect` after every successful (re)connect and the owner is
//! expected to refetch the collection into
//! [`CollectionStore::replace_all`](crate::store::CollectionStore::replace_all).

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use ghx_core::types::RecordId;

/// Reconnection delay after a WebSocket failure.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// The kind of row-level mutation a feed frame describes.
///
/// Mirrors the server envelope's `INSERT`/`UPDATE`/`DELETE` wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// One frame from the per-tenant change feed.
///
/// `new` carries the row after an insert/update; `old` the row before an
/// update/delete when the server captured it. Unknown extra fields on the
/// wire are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeMessage {
    pub organization_id: RecordId,
    /// Entity kind, e.g. `"call_sheets"`.
    pub entity: String,
    pub entity_id: RecordId,
    pub kind: ChangeKind,
    pub actor_user_id: Option<RecordId>,
    pub new: Option<serde_json::Value>,
    pub old: Option<serde_json::Value>,
}

/// Reconnecting consumer of the change-feed WebSocket.
pub struct ChangeListener {
    ws_url: String,
    reconnect_delay: Duration,
}

impl ChangeListener {
    /// Create a listener for the given WebSocket URL (the bearer token is
    /// carried in the URL query, matching the server's `/ws` contract).
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into(),
            reconnect_delay: RECONNECT_DELAY,
        }
    }

    /// Override the fixed reconnect delay.
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Run the feed loop until `cancel` fires.
    ///
    /// `on_event` receives every parsed frame. `on_reconnect` fires after
    /// each successful connect (including the first); its contract is to
    /// trigger a full refetch, bounding divergence to one connection gap.
    pub async fn run<E, R>(&self, mut on_event: E, mut on_reconnect: R, cancel: CancellationToken)
    where
        E: FnMut(ChangeMessage),
        R: FnMut(),
    {
        loop {
            if cancel.is_cancelled() {
                break;
            }

            tracing::info!(url = %self.ws_url, "Connecting to change feed");
            match connect_async(self.ws_url.as_str()).await {
                Ok((ws_stream, _response)) => {
                    tracing::info!("Change feed connected");
                    on_reconnect();
                    run_session(ws_stream, &mut on_event, &cancel).await;
                    if cancel.is_cancelled() {
                        break;
                    }
                    tracing::warn!("Change feed session ended, reconnecting");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Change feed connection failed");
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.reconnect_delay) => {}
            }
        }

        tracing::info!("Change feed listener stopped");
    }
}

/// Drive a single WebSocket session until it closes or `cancel` fires.
async fn run_session<E>(
    ws_stream: tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    on_event: &mut E,
    cancel: &CancellationToken,
) where
    E: FnMut(ChangeMessage),
{
    let (mut sink, mut stream) = ws_stream.split();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = sink.send(Message::Close(None)).await;
                break;
            }
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<ChangeMessage>(&text) {
                    Ok(event) => on_event(event),
                    Err(e) => {
                        tracing::warn!(error = %e, "Ignoring malformed change frame");
                    }
                },
                Some(Ok(Message::Ping(payload))) => {
                    let _ = sink.send(Message::Pong(payload)).await;
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Change feed read failed");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_server_change_frame() {
        let frame = r#"{
            "organization_id": "7f0d3a54-9a65-4c3e-bb32-9d1a0d0c7a11",
            "entity": "call_sheets",
            "entity_id": "f4f9b8e2-31a0-4a3e-8b6f-2f8d5f3f6c01",
            "kind": "UPDATE",
            "actor_user_id": null,
            "new": {"name": "Day 1"},
            "old": null,
            "timestamp": "2025-06-01T07:00:00Z"
        }"#;

        let message: ChangeMessage = serde_json::from_str(frame).unwrap();
        assert_eq!(message.kind, ChangeKind::Update);
        assert_eq!(message.entity, "call_sheets");
        assert_eq!(message.new.as_ref().unwrap()["name"], "Day 1");
        assert!(message.old.is_none());
    }

    #[test]
    fn unknown_kind_fails_to_parse() {
        let frame = r#"{
            "organization_id": "7f0d3a54-9a65-4c3e-bb32-9d1a0d0c7a11",
            "entity": "call_sheets",
            "entity_id": "f4f9b8e2-31a0-4a3e-8b6f-2f8d5f3f6c01",
            "kind": "TRUNCATE",
            "actor_user_id": null,
            "new": null,
            "old": null
        }"#;
        assert!(serde_json::from_str::<ChangeMessage>(frame).is_err());
    }
}
