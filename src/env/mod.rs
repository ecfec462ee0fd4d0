//! Request environment subsystem.
//!
//! # Data Flow
//! ```text
//! bind time:
//!     EnvTemplates::build → three immutable templates
//!                           (no-upgrade / websocket / sse)
//!
//! per request:
//!     template selected by upgrade class
//!     → deep copy into a fresh RequestEnv (builder.rs)
//!     → populated from the ParsedRequest
//!     → handed to the application callback
//!     → markers consumed by the upgrade negotiator
//! ```
//!
//! # Design Decisions
//! - Templates are built once and never mutated; every request gets an
//!   independent owned copy, no shared mutable state across requests
//! - Standard keys hold exactly one value each; generic headers are
//!   `HTTP_`-prefixed and can never shadow them
//! - Upgrade and hijack markers are typed fields on the environment, not
//!   magic map entries

pub mod builder;
pub mod environment;
pub mod keys;
pub mod template;

pub use builder::build;
pub use environment::{EnvValue, RequestEnv};
pub use template::EnvTemplates;
