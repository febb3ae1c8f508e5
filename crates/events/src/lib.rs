//! GHXSTSHIP change-event infrastructure.
//!
//! Building blocks for the platform-wide realtime feed:
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ChangeEvent`] — the canonical row-level change envelope
//!   (insert/update/delete, scoped by organization).
//! - [`ActivityLogger`] — background service that best-effort records each
//!   change in the `activities` table.

pub mod activity;
pub mod bus;

pub use activity::ActivityLogger;
pub use bus::{ChangeEvent, ChangeKind, EventBus};
