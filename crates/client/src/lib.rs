//! Collection-sync layer for GHXSTSHIP admin modules.
//!
//! Every admin module (call sheets, purchase orders, itineraries, lineups)
//! repeats the same shape; this crate factors it out once:
//!
//! - [`remote`] — typed REST collection client ([`RemoteCollection`]) and
//!   the [`CollectionApi`] seam used for dependency injection and test
//!   fakes.
//! - [`store`] — in-memory [`CollectionStore`] with conjunctive filtering,
//!   single-key sorting, a selection set, and change-event merging.
//! - [`listener`] — reconnecting WebSocket consumer of the per-tenant
//!   change feed.
//! - [`views`] — stateless grouping projections (board, calendar,
//!   timeline, location map) over a collection.
//! - [`drawer`] — form controllers for create/edit/view drawers, plus
//!   whole-array sub-list editors.
//! - [`bulk`] — bounded-concurrency bulk operations with per-item
//!   outcomes.
//! - [`forms`] — per-module drawer payload schemas.

pub mod bulk;
pub mod drawer;
pub mod forms;
pub mod listener;
pub mod remote;
pub mod store;
pub mod views;

pub use bulk::{bulk_delete, BulkReport, DEFAULT_BULK_CONCURRENCY};
pub use drawer::{DrawerForm, DrawerMode, FieldError, SubListEditor, SubRecord};
pub use listener::{ChangeListener, ChangeMessage};
pub use remote::{ClientError, CollectionApi, ListPage, PageRequest, RemoteCollection};
pub use store::CollectionStore;
