//! WebSocket infrastructure for the realtime change feed.
//!
//! Provides connection management, heartbeat monitoring, the HTTP upgrade
//! handler used by Axum routes, and the broadcaster that fans bus events
//! out to each tenant's connections.

mod broadcaster;
mod handler;
mod heartbeat;
pub mod manager;

pub use broadcaster::ChangeBroadcaster;
pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
