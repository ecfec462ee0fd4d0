//! The per-connection event adapter.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;

use crate::app::{ConnectionHandler, Message};
use crate::connection::id::{ConnectionId, SessionId};
use crate::dispatch::AppDomain;
use crate::engine::ProtocolHandle;
use crate::observability::metrics;

/// Protocol the connection was upgraded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    WebSocket,
    Sse,
}

impl ConnectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionKind::WebSocket => "websocket",
            ConnectionKind::Sse => "sse",
        }
    }
}

/// Lifecycle event delivered by the network engine for one upgraded
/// connection. Frame data is an owned copy; ownership ends with the
/// handler notification.
#[derive(Debug)]
pub enum ConnectionEvent {
    /// The connection is established; carries the engine's protocol handle
    /// and session identifier.
    Open {
        handle: ProtocolHandle,
        session: SessionId,
    },
    /// One complete inbound frame.
    Message { data: Bytes, is_text: bool },
    /// The outbound buffer transitioned from full to empty.
    Drained,
    /// Server-initiated graceful close while still open.
    Shutdown,
    /// Terminal; fires even when the handshake failed.
    Close,
}

/// One upgraded, long-lived logical stream.
///
/// Created by the Upgrade Negotiator, owned jointly by the engine (which
/// delivers events through [`Connection::fire`]) and the application
/// handler (which may keep the `Arc` to send messages back). Handler
/// notifications run inside the serialization domain, one in flight at a
/// time per connection.
pub struct Connection {
    id: ConnectionId,
    kind: ConnectionKind,
    handler: Arc<dyn ConnectionHandler>,
    domain: Arc<AppDomain>,
    handle: AtomicU64,
    session: AtomicU64,
    ready: AtomicBool,
    opened: AtomicBool,
    shutdown_fired: AtomicBool,
    closed: AtomicBool,
}

impl Connection {
    pub(crate) fn new(
        kind: ConnectionKind,
        handler: Arc<dyn ConnectionHandler>,
        domain: Arc<AppDomain>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: ConnectionId::new(),
            kind,
            handler,
            domain,
            handle: AtomicU64::new(0),
            session: AtomicU64::new(SessionId::NONE.as_u64()),
            ready: AtomicBool::new(false),
            opened: AtomicBool::new(false),
            shutdown_fired: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        })
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn kind(&self) -> ConnectionKind {
        self.kind
    }

    /// The engine's session identifier; `SessionId::NONE` until the open
    /// event completes.
    pub fn session(&self) -> SessionId {
        SessionId(self.session.load(Ordering::SeqCst))
    }

    /// The per-protocol handle stored at open time.
    pub fn protocol_handle(&self) -> Option<ProtocolHandle> {
        match self.handle.load(Ordering::SeqCst) {
            0 => None,
            raw => Some(ProtocolHandle(raw)),
        }
    }

    /// True once the open notification has completed.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Deliver one engine event to the application handler.
    ///
    /// Ordering violations (message before open, events after close) are
    /// dropped with a diagnostic; close is honored exactly once.
    pub async fn fire(&self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Open { handle, session } => {
                if self.opened.swap(true, Ordering::SeqCst) {
                    tracing::warn!(connection_id = %self.id, "duplicate open event dropped");
                    return;
                }
                // Handle and session must be visible to the handler
                // before its open notification runs.
                self.handle.store(handle.0, Ordering::SeqCst);
                self.session.store(session.0, Ordering::SeqCst);
                metrics::record_connection_event("open");
                tracing::debug!(
                    connection_id = %self.id,
                    protocol = self.kind.as_str(),
                    session = %session,
                    "connection open"
                );
                self.domain.enter(|| self.handler.on_open(self)).await;
                self.ready.store(true, Ordering::SeqCst);
            }
            ConnectionEvent::Message { data, is_text } => {
                if !self.opened.load(Ordering::SeqCst) || self.closed.load(Ordering::SeqCst) {
                    tracing::warn!(connection_id = %self.id, "message outside open/close window dropped");
                    return;
                }
                let message = if is_text {
                    Message::Text(String::from_utf8_lossy(&data).into_owned())
                } else {
                    Message::Binary(data)
                };
                metrics::record_connection_event("message");
                self.domain
                    .enter(|| self.handler.on_message(self, message))
                    .await;
            }
            ConnectionEvent::Drained => {
                if !self.opened.load(Ordering::SeqCst) || self.closed.load(Ordering::SeqCst) {
                    return;
                }
                metrics::record_connection_event("drained");
                self.domain.enter(|| self.handler.on_drained(self)).await;
            }
            ConnectionEvent::Shutdown => {
                if !self.opened.load(Ordering::SeqCst)
                    || self.closed.load(Ordering::SeqCst)
                    || self.shutdown_fired.swap(true, Ordering::SeqCst)
                {
                    return;
                }
                metrics::record_connection_event("shutdown");
                tracing::debug!(connection_id = %self.id, "connection shutting down");
                self.domain.enter(|| self.handler.on_shutdown(self)).await;
            }
            ConnectionEvent::Close => {
                if self.closed.swap(true, Ordering::SeqCst) {
                    return;
                }
                self.ready.store(false, Ordering::SeqCst);
                let session = self.session();
                metrics::record_connection_event("close");
                tracing::debug!(
                    connection_id = %self.id,
                    session = %session,
                    "connection closed"
                );
                self.domain.enter(|| self.handler.on_close(session)).await;
            }
        }
    }
}
