//! HTTP handlers, one module per resource.
//!
//! Every mutation follows the same sequence: validate with the shared
//! `ghx-core` rules, call the repository, publish a change event for the
//! organization, log with structured fields, and wrap the row in the
//! standard envelope.

pub mod activities;
pub mod auth;
pub mod call_sheets;
pub mod itineraries;
pub mod lineups;
pub mod overview;
pub mod purchase_orders;

use serde::Serialize;

use ghx_core::types::RecordId;
use ghx_events::ChangeEvent;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Publish an insert event for a freshly created row.
///
/// Serialization failure only costs the event, never the request.
pub(crate) fn publish_insert(
    state: &AppState,
    auth: &AuthUser,
    entity: &'static str,
    id: RecordId,
    row: &impl Serialize,
) {
    match serde_json::to_value(row) {
        Ok(json) => state.event_bus.publish(
            ChangeEvent::insert(auth.organization_id, entity, id, json)
                .with_actor(auth.user_id),
        ),
        Err(e) => {
            tracing::error!(error = %e, entity, "Failed to serialize row for change event");
        }
    }
}

/// Publish an update event carrying the row after the change.
pub(crate) fn publish_update(
    state: &AppState,
    auth: &AuthUser,
    entity: &'static str,
    id: RecordId,
    row: &impl Serialize,
) {
    match serde_json::to_value(row) {
        Ok(json) => state.event_bus.publish(
            ChangeEvent::update(auth.organization_id, entity, id, json)
                .with_actor(auth.user_id),
        ),
        Err(e) => {
            tracing::error!(error = %e, entity, "Failed to serialize row for change event");
        }
    }
}

/// Publish a delete event, attaching the removed row when it serializes.
pub(crate) fn publish_delete(
    state: &AppState,
    auth: &AuthUser,
    entity: &'static str,
    id: RecordId,
    old_row: &impl Serialize,
) {
    let mut event =
        ChangeEvent::delete(auth.organization_id, entity, id).with_actor(auth.user_id);
    match serde_json::to_value(old_row) {
        Ok(json) => event = event.with_old(json),
        Err(e) => {
            tracing::error!(error = %e, entity, "Failed to serialize removed row for change event");
        }
    }
    state.event_bus.publish(event);
}
