//! Configuration validation and normalization.
//!
//! Validation runs once at bind time and collects every failure rather
//! than stopping at the first one. Normalization clamps engine-bounded
//! fields back to their defaults with a warning instead of rejecting
//! the config.

use thiserror::Error;
use tracing::warn;

use crate::config::schema::ListenConfig;

/// Longest interval the engine can honor, in seconds.
const MAX_INTERVAL_SECS: u64 = 255;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no application callback and no public_root configured; nothing to serve")]
    NoAppOrRoot,
}

/// Validates a listen configuration against the presence of an
/// application callback. Returns every failure found.
pub fn validate(config: &ListenConfig, has_app: bool) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !has_app && config.public_root.is_none() {
        errors.push(ValidationError::NoAppOrRoot);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Clamps out-of-range interval fields to the engine default (0).
pub fn normalize(config: &mut ListenConfig) {
    if config.timeout > MAX_INTERVAL_SECS {
        warn!(
            timeout = config.timeout,
            "timeout exceeds engine maximum, falling back to engine default"
        );
        config.timeout = 0;
    }
    if config.ping > MAX_INTERVAL_SECS {
        warn!(
            ping = config.ping,
            "ping interval exceeds engine maximum, falling back to engine default"
        );
        config.ping = 0;
    }
}

/// Renders a validation failure list as a single message.
pub fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
