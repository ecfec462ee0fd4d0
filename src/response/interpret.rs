//! Normalizes a response value into a descriptor and resolves bodies.

use std::path::PathBuf;

use bytes::{Bytes, BytesMut};

use crate::env::keys;
use crate::error::GatewayError;
use crate::response::value::{BodyValue, ResponseValue, StatusValue};

/// Normalized per-request response: status, ready-to-emit header lines,
/// and a body pending resolution. Produced once, consumed immediately.
#[derive(Debug)]
pub struct ResponseDescriptor {
    pub status: u16,
    /// Lowercased names, newline-split values, in emission order.
    pub headers: Vec<(String, String)>,
    pub body: PendingBody,
}

/// Body as it stands after header interpretation but before resolution.
#[derive(Debug)]
pub enum PendingBody {
    /// The application's body value, resolved after upgrade review.
    Value(BodyValue),
    /// Sendfile override: serve this path instead of the body.
    File(PathBuf),
}

/// Fully resolved body, ready for exactly one terminal sink action.
#[derive(Debug, PartialEq, Eq)]
pub enum ResolvedBody {
    /// Headers-only response.
    Empty,
    /// One contiguous buffer.
    Buffer(Bytes),
}

/// Validate the response shape and normalize status and headers.
///
/// The sendfile override is honored only when the gateway serves static
/// files; otherwise the header passes through verbatim.
pub fn interpret(
    value: ResponseValue,
    sendfile_enabled: bool,
) -> Result<ResponseDescriptor, GatewayError> {
    let status = parse_status(&value.status)?;

    let sendfile = if sendfile_enabled {
        value
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(keys::X_SENDFILE))
            .map(|(_, path)| PathBuf::from(path))
    } else {
        None
    };

    let mut headers = Vec::with_capacity(value.headers.len());
    for (name, raw) in value.headers.iter() {
        if sendfile.is_some()
            && (name.eq_ignore_ascii_case(keys::X_SENDFILE)
                || name.eq_ignore_ascii_case("content-length"))
        {
            // The engine controls the length when serving a file, and the
            // original path is never exposed to the peer.
            continue;
        }
        let lowered = name.to_ascii_lowercase();
        push_split_lines(&mut headers, &lowered, raw);
    }

    let body = match sendfile {
        Some(path) => PendingBody::File(path),
        None => PendingBody::Value(value.body),
    };

    Ok(ResponseDescriptor { status, headers, body })
}

fn parse_status(status: &StatusValue) -> Result<u16, GatewayError> {
    let code = match status {
        StatusValue::Code(code) => *code,
        StatusValue::Text(text) => text
            .trim()
            .parse::<u16>()
            .map_err(|_| GatewayError::MalformedResponse("status string was not numeric"))?,
    };
    if !(100..=599).contains(&code) {
        return Err(GatewayError::MalformedResponse("status outside 100-599"));
    }
    Ok(code)
}

/// Each newline-delimited segment becomes its own header line under the
/// same name. An empty value emits nothing; a trailing newline does not
/// produce a trailing empty line.
fn push_split_lines(out: &mut Vec<(String, String)>, name: &str, raw: &str) {
    let mut pos = 0;
    while pos < raw.len() {
        let end = raw[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(raw.len());
        out.push((name.to_string(), raw[pos..end].to_string()));
        pos = end + 1;
    }
}

/// Resolve the body into bytes or an empty response.
///
/// Statuses below 200, 204 and 304 discard the body entirely (closing it
/// when it exposes a close operation) regardless of its content.
pub fn resolve_body(status: u16, body: BodyValue) -> Result<ResolvedBody, GatewayError> {
    if status < 200 || status == 204 || status == 304 {
        if let BodyValue::Stream(mut stream) = body {
            stream.close();
        }
        return Ok(ResolvedBody::Empty);
    }

    match body {
        BodyValue::Chunks(mut chunks) => match chunks.len() {
            0 => Ok(ResolvedBody::Empty),
            1 => Ok(ResolvedBody::Buffer(chunks.pop().unwrap_or_default())),
            _ => Err(GatewayError::MalformedResponse(
                "fixed body sequence with more than one element",
            )),
        },
        BodyValue::Buffer(buf) => Ok(ResolvedBody::Buffer(buf)),
        BodyValue::Stream(mut stream) => {
            let mut buf = BytesMut::new();
            stream.for_each_chunk(&mut |chunk| buf.extend_from_slice(chunk));
            stream.close();
            Ok(ResolvedBody::Buffer(buf.freeze()))
        }
    }
}
