//! Per-request instruction sink implemented by the network engine.

use std::io;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;

use crate::app::RawSocketHandler;
use crate::connection::Connection;

/// Opaque token for a hijacked raw connection, assigned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawSocket(pub u64);

/// Opaque per-protocol handle (WebSocket or SSE) assigned by the engine at
/// open time. Zero means "not yet assigned".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolHandle(pub u64);

/// Outbound instructions the gateway issues against one in-flight request.
///
/// Each call is a single, irreversible instruction; the engine performs the
/// actual transmission asynchronously. The gateway guarantees at most one
/// terminal instruction (`send_body`, `send_file`, `finish`, `send_error`)
/// per request in normal operation.
pub trait RequestSink: Send {
    /// Set the response status.
    fn set_status(&mut self, status: u16);

    /// Add one response header line. Called once per line; multi-value
    /// headers arrive as repeated calls with the same name.
    fn set_header(&mut self, name: &str, value: &str);

    /// Send the buffered response body and finalize the response.
    fn send_body(&mut self, body: Bytes);

    /// Serve a file by path. A failure here is reported to the peer as a
    /// 404 by the caller; headers may already be partially committed.
    fn send_file(&mut self, path: &Path) -> io::Result<()>;

    /// Finalize a headers-only response.
    fn finish(&mut self);

    /// Respond with an error status page.
    fn send_error(&mut self, status: u16);

    /// Take ownership of the raw connection, detaching it from HTTP
    /// handling. The caller still finalizes the header section with
    /// `finish`, before or after taking the socket depending on the
    /// upgrade path.
    fn hijack(&mut self) -> RawSocket;

    /// Attach a previously hijacked socket to a takeover handler; the
    /// engine notifies the handler once the socket is attached.
    fn attach_raw(&mut self, socket: RawSocket, handler: Arc<dyn RawSocketHandler>);

    /// Perform the WebSocket upgrade handshake and register the connection
    /// adapter. The engine must drive `Connection::fire` for the adapter's
    /// whole lifetime, including a final `Close` if the handshake fails.
    fn upgrade_websocket(&mut self, connection: Arc<Connection>);

    /// Same contract as `upgrade_websocket`, for SSE.
    fn upgrade_sse(&mut self, connection: Arc<Connection>);
}
