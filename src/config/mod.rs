//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or hand-built ListenConfig
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (normalize ranges, semantic checks)
//!     → Gateway::bind consumes the validated config
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so a minimal config works
//! - Range violations (timeout/ping above 255) warn and fall back to the
//!   engine default instead of failing the bind
//! - Validation returns every error, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenConfig, Port};
pub use validation::ValidationError;
