//! Gateway error taxonomy.
//!
//! # Design Decisions
//! - Per-request errors degrade to an error status for that request only;
//!   they never abort the engine's worker loop
//! - Every error path emits at least one diagnostic before being mapped
//! - Configuration errors are fatal to the bind operation only

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the bridging layer.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The application callback returned something other than the required
    /// (status, headers, body) shape.
    #[error("application returned a malformed response: {0}")]
    MalformedResponse(&'static str),

    /// No application callback is registered for a route that needs one.
    #[error("no application callback registered")]
    MissingHandler,

    /// Configuration was rejected at bind time.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GatewayError {
    /// The HTTP status reported to the peer for this error.
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::MalformedResponse(_) => 500,
            GatewayError::MissingHandler => 404,
            GatewayError::Config(_) => 500,
        }
    }
}
