//! Shared utilities for gateway integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http::Method;

use rackbridge::{
    Connection, ConnectionHandler, Message, ParsedRequest, RawSocket, RawSocketHandler,
    RequestSink, SessionId,
};

/// One terminal instruction observed by the mock sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    Body(Bytes),
    File(PathBuf),
    Finish,
    Error(u16),
}

/// A recording engine sink. Every instruction is captured so tests can
/// assert on ordering and on the exactly-one-terminal-action guarantee.
#[derive(Default)]
pub struct MockSink {
    pub status: Option<u16>,
    pub headers: Vec<(String, String)>,
    pub terminals: Vec<Terminal>,
    pub hijacked: Vec<RawSocket>,
    pub attached: Vec<RawSocket>,
    pub websocket: Option<Arc<Connection>>,
    pub sse: Option<Arc<Connection>>,
    /// When set, `send_file` fails as if the file were unreadable.
    pub fail_send_file: bool,
    next_socket: u64,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_send_file() -> Self {
        Self {
            fail_send_file: true,
            ..Self::default()
        }
    }

    /// All header values recorded for one (lowercased) name.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

impl RequestSink for MockSink {
    fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn send_body(&mut self, body: Bytes) {
        self.terminals.push(Terminal::Body(body));
    }

    fn send_file(&mut self, path: &Path) -> io::Result<()> {
        if self.fail_send_file {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        }
        self.terminals.push(Terminal::File(path.to_path_buf()));
        Ok(())
    }

    fn finish(&mut self) {
        self.terminals.push(Terminal::Finish);
    }

    fn send_error(&mut self, status: u16) {
        self.terminals.push(Terminal::Error(status));
    }

    fn hijack(&mut self) -> RawSocket {
        self.next_socket += 1;
        let socket = RawSocket(self.next_socket);
        self.hijacked.push(socket);
        socket
    }

    fn attach_raw(&mut self, socket: RawSocket, handler: Arc<dyn RawSocketHandler>) {
        self.attached.push(socket);
        handler.on_attach(socket);
    }

    fn upgrade_websocket(&mut self, connection: Arc<Connection>) {
        self.websocket = Some(connection);
    }

    fn upgrade_sse(&mut self, connection: Arc<Connection>) {
        self.sse = Some(connection);
    }
}

/// Connection handler that records every notification as a string.
#[derive(Default)]
pub struct RecordingHandler {
    events: Mutex<Vec<String>>,
}

impl RecordingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ConnectionHandler for RecordingHandler {
    fn on_open(&self, connection: &Connection) {
        self.push(format!("open:{}", connection.session()));
    }

    fn on_message(&self, _connection: &Connection, message: Message) {
        match message {
            Message::Text(text) => self.push(format!("text:{text}")),
            Message::Binary(data) => self.push(format!("binary:{}", data.len())),
        }
    }

    fn on_drained(&self, _connection: &Connection) {
        self.push("drained".to_string());
    }

    fn on_shutdown(&self, _connection: &Connection) {
        self.push("shutdown".to_string());
    }

    fn on_close(&self, session: SessionId) {
        self.push(format!("close:{session}"));
    }
}

/// A GET request for `path` with the given raw header lines.
pub fn request(path: &str, headers: &[(&str, &str)]) -> ParsedRequest {
    let mut parsed = ParsedRequest::new(Method::GET, path);
    for (name, value) in headers {
        parsed.headers.append(
            http::header::HeaderName::from_bytes(name.as_bytes()).unwrap(),
            http::HeaderValue::from_str(value).unwrap(),
        );
    }
    parsed
}
