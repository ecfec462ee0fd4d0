//! The parsed request record consumed from the engine.

use std::net::SocketAddr;

use http::{HeaderMap, Method, Version};

/// Opaque token for the engine-owned request body reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyHandle(pub u64);

/// One parsed HTTP request as delivered by the network engine.
///
/// Headers are an ordered multimap; repeated names are preserved and
/// surface in the environment as ordered string lists.
#[derive(Debug)]
pub struct ParsedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub version: Version,
    pub headers: HeaderMap,
    pub peer_addr: Option<SocketAddr>,
    pub body: Option<BodyHandle>,
}

impl ParsedRequest {
    /// A minimal request record; fields beyond method and path get neutral
    /// defaults.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            peer_addr: None,
            body: None,
        }
    }
}

/// Upgrade class negotiated during the handshake, derived from the short
/// protocol token the engine attaches to the upgrade notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpgradeClass {
    #[default]
    None,
    WebSocket,
    Sse,
}

impl UpgradeClass {
    /// Recognizes `"websocket"` and `"sse"`; anything else is no class,
    /// which falls through to ordinary request handling.
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("websocket") {
            UpgradeClass::WebSocket
        } else if token.eq_ignore_ascii_case("sse") {
            UpgradeClass::Sse
        } else {
            UpgradeClass::None
        }
    }
}

/// The protocol-version string exposed under the environment's version keys.
pub(crate) fn protocol_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/1.1",
    }
}
