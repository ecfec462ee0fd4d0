//! Listen-time configuration schema.
//!
//! All types derive Serde traits for deserialization from config files.
//! The surface is resolved once at bind time, never per request.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Listening port: accepted as either a string or a number.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Port {
    Number(u16),
    Text(String),
}

impl Default for Port {
    fn default() -> Self {
        Port::Text("3000".to_string())
    }
}

impl std::fmt::Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Port::Number(n) => write!(f, "{n}"),
            Port::Text(s) => f.write_str(s),
        }
    }
}

/// Configuration for one listening gateway.
///
/// Size and interval fields use 0 for "engine default".
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Port to listen on.
    pub port: Port,

    /// Bind address; unset binds all addresses.
    pub address: Option<String>,

    /// Root folder for static file service; enables sendfile support.
    pub public_root: Option<PathBuf>,

    /// Log completed requests at info level.
    pub log_requests: bool,

    /// Idle-connection timeout in seconds (0-255, 0 = engine default).
    pub timeout: u64,

    /// Maximum inbound body size in bytes (0 = engine default).
    pub max_body: usize,

    /// Maximum total header size in bytes (0 = engine default).
    pub max_headers: usize,

    /// Maximum WebSocket message size in bytes (0 = engine default).
    pub max_message: usize,

    /// WebSocket ping interval in seconds (0-255, 0 = engine default).
    pub ping: u64,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            port: Port::default(),
            address: None,
            public_root: None,
            log_requests: false,
            timeout: 40,
            max_body: 0,
            max_headers: 0,
            max_message: 0,
            ping: 40,
        }
    }
}
