//! Application boundary traits.
//!
//! # Data Flow
//! ```text
//! Dispatch Driver
//!     → AppCallback::call(env) inside the serialization domain
//!     → ResponseValue interpreted by the response module
//!
//! upgraded connections:
//!     engine events → Connection adapter → ConnectionHandler notifications
//!     raw TCP takeover → RawSocketHandler::on_attach
//! ```
//!
//! # Design Decisions
//! - The callback is synchronous; it runs while the global serialization
//!   domain is held, so at most one callback executes at a time across all
//!   workers
//! - Handler notifications carry owned copies of frame data; nothing may be
//!   referenced after the notification returns
//! - All trait methods except `call` have empty defaults so handlers only
//!   implement the events they care about

use bytes::Bytes;

use crate::connection::{Connection, SessionId};
use crate::engine::RawSocket;
use crate::env::RequestEnv;
use crate::response::ResponseValue;

/// The per-request application callback.
///
/// Receives the canonical request environment and returns the three-part
/// response value. Implemented for any matching closure.
pub trait AppCallback: Send + Sync {
    fn call(&self, env: &mut RequestEnv) -> ResponseValue;
}

impl<F> AppCallback for F
where
    F: Fn(&mut RequestEnv) -> ResponseValue + Send + Sync,
{
    fn call(&self, env: &mut RequestEnv) -> ResponseValue {
        self(env)
    }
}

/// One decoded frame delivered to a connection handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Text frame, decoded as UTF-8 (lossily on invalid sequences).
    Text(String),
    /// Binary frame.
    Binary(Bytes),
}

/// Per-connection application handler for upgraded sessions.
///
/// Notifications arrive with at most one in flight at a time per
/// connection, in the order `open, (message|drained)*, shutdown?, close`.
pub trait ConnectionHandler: Send + Sync {
    /// The connection is established; fires exactly once, before any
    /// message.
    fn on_open(&self, _connection: &Connection) {}

    /// A complete inbound message.
    fn on_message(&self, _connection: &Connection, _message: Message) {}

    /// The outbound buffer transitioned from full back to empty. Never
    /// fires if the buffer was never full.
    fn on_drained(&self, _connection: &Connection) {}

    /// Server-initiated graceful close while the connection is still open;
    /// at most once, always before `on_close`.
    fn on_shutdown(&self, _connection: &Connection) {}

    /// Terminal event; fires exactly once, even if the handshake failed.
    /// On handshake failure the session id is `SessionId::NONE`.
    fn on_close(&self, _session: SessionId) {}
}

/// Handler receiving ownership of a raw TCP connection after takeover.
pub trait RawSocketHandler: Send + Sync {
    /// The engine attached the hijacked socket to this handler.
    fn on_attach(&self, socket: RawSocket);
}
