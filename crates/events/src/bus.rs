//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`ChangeEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use ghx_core::types::RecordId;

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

/// The kind of row-level mutation an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A row-level change that occurred in one organization's data.
///
/// Constructed via [`ChangeEvent::insert`], [`ChangeEvent::update`], or
/// [`ChangeEvent::delete`] and enriched with
/// [`with_actor`](ChangeEvent::with_actor).
///
/// `new` carries the row after an insert/update; `old` carries the row
/// before an update/delete. Subscribers merge these into their local state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// The tenant whose data changed. Delivery is scoped to this id.
    pub organization_id: RecordId,

    /// Entity kind, e.g. `"call_sheets"`.
    pub entity: String,

    /// The mutated row's id.
    pub entity_id: RecordId,

    /// What happened to the row.
    pub kind: ChangeKind,

    /// Id of the user that caused the change, when known.
    pub actor_user_id: Option<RecordId>,

    /// The row after the change (insert/update).
    pub new: Option<serde_json::Value>,

    /// The row before the change (update/delete), when captured.
    pub old: Option<serde_json::Value>,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    fn base(
        organization_id: RecordId,
        entity: impl Into<String>,
        entity_id: RecordId,
        kind: ChangeKind,
    ) -> Self {
        Self {
            organization_id,
            entity: entity.into(),
            entity_id,
            kind,
            actor_user_id: None,
            new: None,
            old: None,
            timestamp: Utc::now(),
        }
    }

    /// An insert event carrying the created row.
    pub fn insert(
        organization_id: RecordId,
        entity: impl Into<String>,
        entity_id: RecordId,
        new: serde_json::Value,
    ) -> Self {
        let mut event = Self::base(organization_id, entity, entity_id, ChangeKind::Insert);
        event.new = Some(new);
        event
    }

    /// An update event carrying the row after the change.
    pub fn update(
        organization_id: RecordId,
        entity: impl Into<String>,
        entity_id: RecordId,
        new: serde_json::Value,
    ) -> Self {
        let mut event = Self::base(organization_id, entity, entity_id, ChangeKind::Update);
        event.new = Some(new);
        event
    }

    /// A delete event; `old` optionally carries the removed row.
    pub fn delete(
        organization_id: RecordId,
        entity: impl Into<String>,
        entity_id: RecordId,
    ) -> Self {
        Self::base(organization_id, entity, entity_id, ChangeKind::Delete)
    }

    /// Attach the acting user to the event.
    pub fn with_actor(mut self, user_id: RecordId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Attach the pre-change row to the event.
    pub fn with_old(mut self, old: serde_json::Value) -> Self {
        self.old = Some(old);
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`ChangeEvent`].
pub struct EventBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: ChangeEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
