//! The typed three-part response value returned by the application.

use bytes::Bytes;

/// Response status: a code, or a numeric string that must parse as one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusValue {
    Code(u16),
    Text(String),
}

impl From<u16> for StatusValue {
    fn from(code: u16) -> Self {
        StatusValue::Code(code)
    }
}

impl From<&str> for StatusValue {
    fn from(text: &str) -> Self {
        StatusValue::Text(text.to_string())
    }
}

impl From<String> for StatusValue {
    fn from(text: String) -> Self {
        StatusValue::Text(text)
    }
}

/// Ordered response header mapping. Insertion order is emission order;
/// values containing `\n` are later split into separate header lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: Vec<(String, String)>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ResponseHeaders {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}

/// A streaming body source with the for-each-over-chunks capability.
///
/// `close` releases any external resource (open file, wrapped stream) and
/// is invoked exactly once, even when no chunk is ever transmitted.
pub trait BodyStream: Send {
    fn for_each_chunk(&mut self, emit: &mut dyn FnMut(&[u8]));
    fn close(&mut self) {}
}

/// The body part of a response value.
pub enum BodyValue {
    /// A fixed sequence of chunks. Zero elements is an empty response, one
    /// element is unwrapped; two or more is not a defined body form.
    Chunks(Vec<Bytes>),
    /// A single contiguous buffer, used as-is.
    Buffer(Bytes),
    /// A streaming source, drained eagerly and then closed.
    Stream(Box<dyn BodyStream>),
}

impl BodyValue {
    /// Headers-only response body.
    pub fn empty() -> Self {
        BodyValue::Chunks(Vec::new())
    }

    pub fn text(body: impl Into<String>) -> Self {
        BodyValue::Buffer(Bytes::from(body.into()))
    }

    pub fn bytes(body: impl Into<Bytes>) -> Self {
        BodyValue::Buffer(body.into())
    }
}

impl std::fmt::Debug for BodyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyValue::Chunks(chunks) => f.debug_tuple("Chunks").field(&chunks.len()).finish(),
            BodyValue::Buffer(buf) => f.debug_tuple("Buffer").field(&buf.len()).finish(),
            BodyValue::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// The three-part value the application callback returns.
#[derive(Debug)]
pub struct ResponseValue {
    pub status: StatusValue,
    pub headers: ResponseHeaders,
    pub body: BodyValue,
}

impl ResponseValue {
    pub fn new(
        status: impl Into<StatusValue>,
        headers: ResponseHeaders,
        body: BodyValue,
    ) -> Self {
        Self {
            status: status.into(),
            headers,
            body,
        }
    }

    /// Plain text response without headers.
    pub fn text(status: impl Into<StatusValue>, body: impl Into<String>) -> Self {
        Self::new(status, ResponseHeaders::new(), BodyValue::text(body))
    }

    /// Headers-only response.
    pub fn empty(status: impl Into<StatusValue>) -> Self {
        Self::new(status, ResponseHeaders::new(), BodyValue::empty())
    }
}
