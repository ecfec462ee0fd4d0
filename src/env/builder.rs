//! Builds one RequestEnv from a parsed request.

use http::header;
use http::HeaderMap;

use crate::engine::request::protocol_version;
use crate::engine::{ParsedRequest, UpgradeClass};
use crate::env::environment::{EnvValue, RequestEnv};
use crate::env::keys;
use crate::env::template::EnvTemplates;

/// Bound on how far the `Forwarded` header is scanned for `proto=`;
/// adversarial values without delimiters stay cheap.
const MAX_FORWARDED_SCAN: usize = 1024;

/// Build the canonical environment for one request. Never fails; absent or
/// malformed inbound data degrades to best-effort defaults.
pub fn build(
    request: &ParsedRequest,
    class: UpgradeClass,
    templates: &EnvTemplates,
) -> RequestEnv {
    let entries = templates.select(class).clone();
    let mut env = RequestEnv::from_entries(entries, class, request.body);

    env.set(keys::REQUEST_METHOD, request.method.as_str());
    env.set(keys::PATH_INFO, request.path.as_str());
    match request.query.as_deref() {
        Some(q) if !q.is_empty() => env.set(keys::QUERY_STRING, q),
        _ => env.set(keys::QUERY_STRING, keys::EMPTY),
    }

    // The protocol version appears under two keys for compatibility.
    let version = protocol_version(request.version);
    env.set(keys::SERVER_PROTOCOL, version);
    env.set(keys::HTTP_VERSION, version);

    if let Some(peer) = request.peer_addr {
        env.set(keys::REMOTE_ADDR, peer.to_string());
    }

    set_host(&mut env, &request.headers);
    set_entity_headers(&mut env, &request.headers);
    set_scheme(&mut env, &request.headers);
    copy_headers(&mut env, &request.headers);

    env
}

/// `Host` parsing, including the host:port form. A missing header yields an
/// empty server name rather than an error.
fn set_host(env: &mut RequestEnv, headers: &HeaderMap) {
    let host = headers
        .get(header::HOST)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();
    match host.split_once(':') {
        Some((name, port)) => {
            env.set(keys::SERVER_NAME, name);
            env.set(keys::SERVER_PORT, port);
        }
        None => {
            env.set(keys::SERVER_NAME, host);
            env.set(keys::SERVER_PORT, keys::EMPTY);
        }
    }
}

/// Content-Length and Content-Type get dedicated keys and are excluded from
/// the generic header copy.
fn set_entity_headers(env: &mut RequestEnv, headers: &HeaderMap) {
    if let Some(value) = headers.get(header::CONTENT_LENGTH) {
        env.set(
            keys::CONTENT_LENGTH,
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }
    if let Some(value) = headers.get(header::CONTENT_TYPE) {
        if !value.is_empty() {
            env.set(
                keys::CONTENT_TYPE,
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
    }
}

/// Effective URL scheme: `X-Forwarded-Proto` wins, then the `Forwarded`
/// header's `proto=` parameter, else the template default stays.
fn set_scheme(env: &mut RequestEnv, headers: &HeaderMap) {
    if let Some(value) = headers.get("x-forwarded-proto") {
        let proto = String::from_utf8_lossy(value.as_bytes());
        if proto.eq_ignore_ascii_case(keys::SCHEME_HTTPS) {
            env.set(keys::URL_SCHEME, keys::SCHEME_HTTPS);
        } else if proto.eq_ignore_ascii_case(keys::SCHEME_HTTP) {
            env.set(keys::URL_SCHEME, keys::SCHEME_HTTP);
        } else {
            env.set(keys::URL_SCHEME, proto.into_owned());
        }
    } else if let Some(value) = headers.get(header::FORWARDED) {
        let raw = String::from_utf8_lossy(value.as_bytes());
        if let Some(proto) = forwarded_proto(&raw) {
            if proto.eq_ignore_ascii_case(keys::SCHEME_HTTPS) {
                env.set(keys::URL_SCHEME, keys::SCHEME_HTTPS);
            } else if proto.eq_ignore_ascii_case(keys::SCHEME_HTTP) {
                env.set(keys::URL_SCHEME, keys::SCHEME_HTTP);
            } else {
                env.set(keys::URL_SCHEME, proto);
            }
        }
    }
}

/// Case-insensitive `proto=` scan, value runs to `;` or end of value.
/// Scanning stops at MAX_FORWARDED_SCAN bytes.
fn forwarded_proto(raw: &str) -> Option<String> {
    let mut end = raw.len().min(MAX_FORWARDED_SCAN);
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    let bounded = &raw[..end];
    let haystack = bounded.to_ascii_lowercase();
    let start = haystack.find("proto=")? + "proto=".len();
    let rest = &bounded[start..];
    let value_end = rest.find(';').unwrap_or(rest.len());
    Some(rest[..value_end].to_string())
}

/// Every remaining header lands under its canonical prefixed key;
/// multi-valued headers materialize as ordered string lists.
fn copy_headers(env: &mut RequestEnv, headers: &HeaderMap) {
    for name in headers.keys() {
        if name == header::CONTENT_LENGTH || name == header::CONTENT_TYPE {
            continue;
        }
        let key = keys::prefix_header(name.as_str());
        // An inbound `Version:` header would prefix to the standard
        // protocol-version key; standard keys are never client-writable.
        if key == keys::HTTP_VERSION {
            tracing::debug!(header = name.as_str(), "header shadowing a standard key dropped");
            continue;
        }
        let mut values: Vec<String> = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        if values.len() == 1 {
            env.set(key, values.pop().unwrap_or_default());
        } else {
            env.set(key, values);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn request_with(headers: &[(&str, &str)]) -> ParsedRequest {
        let mut request = ParsedRequest::new(Method::GET, "/");
        for (name, value) in headers {
            request.headers.append(
                http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                http::HeaderValue::from_str(value).unwrap(),
            );
        }
        request
    }

    fn build_env(request: &ParsedRequest) -> RequestEnv {
        build(request, UpgradeClass::None, &EnvTemplates::build(false))
    }

    #[test]
    fn host_with_port() {
        let env = build_env(&request_with(&[("host", "example.com:8080")]));
        assert_eq!(env.get_str(keys::SERVER_NAME), Some("example.com"));
        assert_eq!(env.get_str(keys::SERVER_PORT), Some("8080"));
    }

    #[test]
    fn host_without_port() {
        let env = build_env(&request_with(&[("host", "example.com")]));
        assert_eq!(env.get_str(keys::SERVER_NAME), Some("example.com"));
        assert_eq!(env.get_str(keys::SERVER_PORT), Some(""));
    }

    #[test]
    fn missing_host_degrades_to_empty() {
        let env = build_env(&request_with(&[]));
        assert_eq!(env.get_str(keys::SERVER_NAME), Some(""));
        assert_eq!(env.get_str(keys::SERVER_PORT), Some(""));
    }

    #[test]
    fn version_appears_twice() {
        let env = build_env(&request_with(&[]));
        assert_eq!(env.get_str(keys::SERVER_PROTOCOL), Some("HTTP/1.1"));
        assert_eq!(env.get_str(keys::HTTP_VERSION), Some("HTTP/1.1"));
    }

    #[test]
    fn version_header_cannot_shadow_standard_key() {
        let env = build_env(&request_with(&[("version", "HTTP/9.9")]));
        assert_eq!(env.get_str(keys::HTTP_VERSION), Some("HTTP/1.1"));
    }

    #[test]
    fn empty_query_normalized() {
        let mut request = request_with(&[]);
        request.query = Some(String::new());
        let env = build_env(&request);
        assert_eq!(env.get_str(keys::QUERY_STRING), Some(""));

        request.query = Some("a=1&b=2".into());
        let env = build_env(&request);
        assert_eq!(env.get_str(keys::QUERY_STRING), Some("a=1&b=2"));
    }

    #[test]
    fn forwarded_proto_header_wins() {
        let env = build_env(&request_with(&[("x-forwarded-proto", "https")]));
        assert_eq!(env.get_str(keys::URL_SCHEME), Some("https"));

        let env = build_env(&request_with(&[("x-forwarded-proto", "HTTPS")]));
        assert_eq!(env.get_str(keys::URL_SCHEME), Some("https"));

        // Unrecognized values pass through raw.
        let env = build_env(&request_with(&[("x-forwarded-proto", "wss")]));
        assert_eq!(env.get_str(keys::URL_SCHEME), Some("wss"));
    }

    #[test]
    fn forwarded_header_proto_parameter() {
        let env = build_env(&request_with(&[(
            "forwarded",
            "for=192.0.2.60;proto=https;by=203.0.113.43",
        )]));
        assert_eq!(env.get_str(keys::URL_SCHEME), Some("https"));

        let env = build_env(&request_with(&[("forwarded", "PROTO=HTTP")]));
        assert_eq!(env.get_str(keys::URL_SCHEME), Some("http"));
    }

    #[test]
    fn scheme_defaults_to_http() {
        let env = build_env(&request_with(&[]));
        assert_eq!(env.get_str(keys::URL_SCHEME), Some("http"));
    }

    #[test]
    fn forwarded_scan_is_bounded() {
        let long = format!("{};proto=https", "x".repeat(MAX_FORWARDED_SCAN));
        let env = build_env(&request_with(&[("forwarded", long.as_str())]));
        // proto= lies beyond the scan bound and is ignored.
        assert_eq!(env.get_str(keys::URL_SCHEME), Some("http"));
    }

    #[test]
    fn entity_headers_not_duplicated() {
        let env = build_env(&request_with(&[
            ("content-length", "12"),
            ("content-type", "text/plain"),
        ]));
        assert_eq!(env.get_str(keys::CONTENT_LENGTH), Some("12"));
        assert_eq!(env.get_str(keys::CONTENT_TYPE), Some("text/plain"));
        assert!(env.get("HTTP_CONTENT_LENGTH").is_none());
        assert!(env.get("HTTP_CONTENT_TYPE").is_none());
    }

    #[test]
    fn generic_headers_prefixed_and_uppercased() {
        let env = build_env(&request_with(&[("x-custom-header", "v")]));
        assert_eq!(env.get_str("HTTP_X_CUSTOM_HEADER"), Some("v"));
    }

    #[test]
    fn multi_valued_header_becomes_list() {
        let env = build_env(&request_with(&[
            ("accept-encoding", "gzip"),
            ("accept-encoding", "br"),
        ]));
        let values = env.get("HTTP_ACCEPT_ENCODING").unwrap().as_list().unwrap();
        assert_eq!(values, ["gzip".to_string(), "br".to_string()]);
    }

    #[test]
    fn peer_address_best_effort() {
        let mut request = request_with(&[]);
        assert!(build_env(&request).get(keys::REMOTE_ADDR).is_none());

        request.peer_addr = Some("192.0.2.1:4711".parse().unwrap());
        let env = build_env(&request);
        assert_eq!(env.get_str(keys::REMOTE_ADDR), Some("192.0.2.1:4711"));
    }
}
