//! The per-request environment handed to the application callback.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::app::{ConnectionHandler, RawSocketHandler};
use crate::engine::{BodyHandle, RawSocket, UpgradeClass};

/// One environment value: a string, or an ordered list of strings for
/// multi-valued headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvValue {
    Str(String),
    List(Vec<String>),
}

impl EnvValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnvValue::Str(s) => Some(s),
            EnvValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            EnvValue::Str(_) => None,
            EnvValue::List(items) => Some(items),
        }
    }
}

impl From<String> for EnvValue {
    fn from(value: String) -> Self {
        EnvValue::Str(value)
    }
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        EnvValue::Str(value.to_string())
    }
}

impl From<Vec<String>> for EnvValue {
    fn from(values: Vec<String>) -> Self {
        EnvValue::List(values)
    }
}

/// Callback invoked with the raw socket once the gateway performs a full
/// hijack on the application's behalf.
pub type HijackCallback = Box<dyn FnOnce(RawSocket) + Send>;

/// Canonical per-request metadata mapping plus the typed upgrade and
/// hijack markers the application may set before returning.
///
/// Owned by the Dispatch Driver for the duration of one request; markers
/// are consumed exactly once by the upgrade negotiator.
pub struct RequestEnv {
    entries: BTreeMap<String, EnvValue>,
    upgrade_class: UpgradeClass,
    input: Option<BodyHandle>,
    upgrade_handler: Option<Arc<dyn ConnectionHandler>>,
    hijack_callback: Option<HijackCallback>,
    raw_io_hijacked: bool,
    tcp_takeover: Option<Arc<dyn RawSocketHandler>>,
}

impl RequestEnv {
    pub(crate) fn from_entries(
        entries: BTreeMap<String, EnvValue>,
        upgrade_class: UpgradeClass,
        input: Option<BodyHandle>,
    ) -> Self {
        Self {
            entries,
            upgrade_class,
            input,
            upgrade_handler: None,
            hijack_callback: None,
            raw_io_hijacked: false,
            tcp_takeover: None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.entries.get(key)
    }

    /// Convenience accessor for single-valued keys.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(EnvValue::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<EnvValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The upgrade class negotiated during the handshake, if any.
    pub fn upgrade_class(&self) -> UpgradeClass {
        self.upgrade_class
    }

    /// The engine's opaque body-reader handle.
    pub fn input(&self) -> Option<BodyHandle> {
        self.input
    }

    /// Opt into the protocol upgrade negotiated for this request
    /// (WebSocket or SSE). Ignored unless the handshake actually
    /// negotiated that protocol.
    pub fn set_upgrade_handler(&mut self, handler: Arc<dyn ConnectionHandler>) {
        self.upgrade_handler = Some(handler);
    }

    /// Request a full hijack: after headers are flushed the gateway takes
    /// the raw socket and passes it to `callback`.
    pub fn hijack_with(&mut self, callback: impl FnOnce(RawSocket) + Send + 'static) {
        self.hijack_callback = Some(Box::new(callback));
    }

    /// Declare that the application already owns the raw socket; the
    /// gateway finalizes headers and performs no further I/O.
    pub fn mark_raw_hijacked(&mut self) {
        self.raw_io_hijacked = true;
    }

    /// Request a raw TCP takeover: the socket is hijacked and attached to
    /// `handler` after headers are flushed.
    pub fn take_over_tcp(&mut self, handler: Arc<dyn RawSocketHandler>) {
        self.tcp_takeover = Some(handler);
    }

    pub fn has_upgrade_handler(&self) -> bool {
        self.upgrade_handler.is_some()
    }

    pub fn has_hijack_callback(&self) -> bool {
        self.hijack_callback.is_some()
    }

    pub fn is_raw_io_hijacked(&self) -> bool {
        self.raw_io_hijacked
    }

    pub fn has_tcp_takeover(&self) -> bool {
        self.tcp_takeover.is_some()
    }

    pub(crate) fn take_upgrade_handler(&mut self) -> Option<Arc<dyn ConnectionHandler>> {
        self.upgrade_handler.take()
    }

    pub(crate) fn take_hijack_callback(&mut self) -> Option<HijackCallback> {
        self.hijack_callback.take()
    }

    pub(crate) fn take_tcp_takeover(&mut self) -> Option<Arc<dyn RawSocketHandler>> {
        self.tcp_takeover.take()
    }
}

impl std::fmt::Debug for RequestEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestEnv")
            .field("entries", &self.entries)
            .field("upgrade_class", &self.upgrade_class)
            .field("upgrade_handler", &self.upgrade_handler.is_some())
            .field("hijack_callback", &self.hijack_callback.is_some())
            .field("raw_io_hijacked", &self.raw_io_hijacked)
            .field("tcp_takeover", &self.tcp_takeover.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_value_accessors() {
        let single = EnvValue::from("a");
        assert_eq!(single.as_str(), Some("a"));
        assert!(single.as_list().is_none());

        let multi = EnvValue::from(vec!["a".to_string(), "b".to_string()]);
        assert!(multi.as_str().is_none());
        assert_eq!(multi.as_list().map(<[String]>::len), Some(2));
    }

    #[test]
    fn markers_consumed_once() {
        let mut env =
            RequestEnv::from_entries(BTreeMap::new(), UpgradeClass::None, None);
        env.hijack_with(|_socket| {});
        assert!(env.has_hijack_callback());
        assert!(env.take_hijack_callback().is_some());
        assert!(env.take_hijack_callback().is_none());
        assert!(!env.has_hijack_callback());
    }
}
