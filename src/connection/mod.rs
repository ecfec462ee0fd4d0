//! Upgraded-connection subsystem.
//!
//! # Data Flow
//! ```text
//! Upgrade Negotiator creates an Arc<Connection>
//!     → registered with the engine (upgrade_websocket / upgrade_sse)
//!     → engine drives Connection::fire with lifecycle events
//!     → adapter forwards each event to the application handler inside
//!       the serialization domain
//!
//! Event order per connection:
//!     Open, (Message | Drained)*, Shutdown?, Close
//! ```
//!
//! # Design Decisions
//! - One adapter per upgraded connection, uniform over WebSocket and SSE
//! - Close fires the handler exactly once, even when the handshake failed;
//!   the session id is then the `SessionId::NONE` sentinel
//! - Out-of-order engine events are dropped with a diagnostic rather than
//!   surfaced to the handler

pub mod adapter;
pub mod id;

pub use adapter::{Connection, ConnectionEvent, ConnectionKind};
pub use id::{ConnectionId, SessionId};
