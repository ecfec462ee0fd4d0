//! Intent classification and the upgrade state machine.

use std::sync::Arc;

use crate::connection::{Connection, ConnectionKind};
use crate::dispatch::AppDomain;
use crate::engine::{RequestSink, UpgradeClass};
use crate::env::RequestEnv;
use crate::observability::metrics;

/// The single winning upgrade intent for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeIntent {
    None,
    HijackCallback,
    HijackRawIo,
    TcpTakeover,
    WebSocket,
    Sse,
}

/// Derive the winning intent from environment markers and the handshake
/// class. Markers and handshake are independent signals; a negotiated
/// protocol without a handler leaves the upgrade unavailable.
pub fn classify(env: &RequestEnv, status: u16) -> UpgradeIntent {
    if status >= 300 {
        return UpgradeIntent::None;
    }
    if env.has_hijack_callback() {
        return UpgradeIntent::HijackCallback;
    }
    if env.is_raw_io_hijacked() {
        return UpgradeIntent::HijackRawIo;
    }
    if env.has_tcp_takeover() {
        return UpgradeIntent::TcpTakeover;
    }
    match env.upgrade_class() {
        UpgradeClass::WebSocket if env.has_upgrade_handler() => UpgradeIntent::WebSocket,
        UpgradeClass::Sse if env.has_upgrade_handler() => UpgradeIntent::Sse,
        _ => UpgradeIntent::None,
    }
}

/// Evaluate the state machine once per request, after headers are
/// finalized but before body transmission. Returns true when the request
/// upgraded and the driver must not transmit a body.
pub fn review(
    env: &mut RequestEnv,
    status: u16,
    sink: &mut dyn RequestSink,
    domain: &Arc<AppDomain>,
) -> bool {
    match classify(env, status) {
        UpgradeIntent::None => false,
        UpgradeIntent::HijackCallback => {
            sink.finish();
            let socket = sink.hijack();
            if let Some(callback) = env.take_hijack_callback() {
                callback(socket);
            }
            metrics::record_upgrade("hijack");
            tracing::debug!(socket = socket.0, "connection hijacked via callback");
            true
        }
        UpgradeIntent::HijackRawIo => {
            // The application owns the socket; only the header section
            // still belongs to the gateway.
            sink.finish();
            metrics::record_upgrade("hijack_io");
            tracing::debug!("connection hijacked by application");
            true
        }
        UpgradeIntent::TcpTakeover => {
            let socket = sink.hijack();
            sink.finish();
            if let Some(handler) = env.take_tcp_takeover() {
                sink.attach_raw(socket, handler);
            }
            metrics::record_upgrade("tcp");
            tracing::debug!(socket = socket.0, "raw TCP takeover");
            true
        }
        UpgradeIntent::WebSocket => {
            let Some(handler) = env.take_upgrade_handler() else {
                return false;
            };
            let connection =
                Connection::new(ConnectionKind::WebSocket, handler, domain.clone());
            tracing::debug!(connection_id = %connection.id(), "websocket upgrade");
            sink.upgrade_websocket(connection);
            metrics::record_upgrade("websocket");
            true
        }
        UpgradeIntent::Sse => {
            let Some(handler) = env.take_upgrade_handler() else {
                return false;
            };
            let connection = Connection::new(ConnectionKind::Sse, handler, domain.clone());
            tracing::debug!(connection_id = %connection.id(), "sse upgrade");
            sink.upgrade_sse(connection);
            metrics::record_upgrade("sse");
            true
        }
    }
}
