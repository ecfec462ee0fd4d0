//! Canonical environment key names.

/// Request method, e.g. `GET`.
pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
/// Request path.
pub const PATH_INFO: &str = "PATH_INFO";
/// Raw query string; the empty string when absent.
pub const QUERY_STRING: &str = "QUERY_STRING";
/// Host name from the `Host` header.
pub const SERVER_NAME: &str = "SERVER_NAME";
/// Port from the `Host` header; the empty string when absent.
pub const SERVER_PORT: &str = "SERVER_PORT";
/// Protocol version, e.g. `HTTP/1.1`.
pub const SERVER_PROTOCOL: &str = "SERVER_PROTOCOL";
/// Protocol version again, for compatibility.
pub const HTTP_VERSION: &str = "HTTP_VERSION";
/// Peer address, best effort.
pub const REMOTE_ADDR: &str = "REMOTE_ADDR";
/// Dedicated key for the request `Content-Length` header.
pub const CONTENT_LENGTH: &str = "CONTENT_LENGTH";
/// Dedicated key for the request `Content-Type` header.
pub const CONTENT_TYPE: &str = "CONTENT_TYPE";
/// Mount-point prefix; always the empty string here.
pub const SCRIPT_NAME: &str = "SCRIPT_NAME";
/// Effective URL scheme (`http` / `https` / raw forwarded value).
pub const URL_SCHEME: &str = "rack.url_scheme";
/// Upgrade class advertised to the application (`websocket` / `sse`).
pub const UPGRADE_QUERY: &str = "rack.upgrade?";
/// Sendfile capability advertisement, present when static files are served.
pub const SENDFILE_TYPE: &str = "sendfile.type";
/// Header-style alias of the sendfile capability advertisement.
pub const SENDFILE_TYPE_HEADER: &str = "HTTP_X_SENDFILE_TYPE";

/// The response header that redirects the body to a file on disk.
pub const X_SENDFILE: &str = "X-Sendfile";

/// Prefix for generic request headers copied into the environment.
pub const HTTP_PREFIX: &str = "HTTP_";

pub const SCHEME_HTTP: &str = "http";
pub const SCHEME_HTTPS: &str = "https";

/// Shared empty-string constant used for absent query strings and ports.
pub const EMPTY: &str = "";

/// Canonical environment key for a generic request header: `HTTP_` prefix,
/// uppercased, `-` replaced with `_`.
pub fn prefix_header(name: &str) -> String {
    let mut key = String::with_capacity(HTTP_PREFIX.len() + name.len());
    key.push_str(HTTP_PREFIX);
    for c in name.chars() {
        key.push(match c {
            '-' => '_',
            c => c.to_ascii_uppercase(),
        });
    }
    key
}
