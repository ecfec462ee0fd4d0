//! Configuration file loading.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::config::schema::ListenConfig;
use crate::config::validation::{self, ValidationError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {}", validation::join(.0))]
    Validation(Vec<ValidationError>),
}

/// Loads a listen configuration from a TOML file.
///
/// Normalization is applied but app-dependent validation is deferred to
/// bind time, when the presence of an application callback is known.
pub fn load_config(path: &Path) -> Result<ListenConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let mut config: ListenConfig = toml::from_str(&raw)?;
    validation::normalize(&mut config);
    info!(path = %path.display(), port = %config.port, "configuration loaded");
    Ok(config)
}
