//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! engine: on_request / on_upgrade
//!     → Gateway (driver.rs) acquires the serialization domain (domain.rs)
//!     → environment built, application callback invoked
//!     → response interpreted, headers written to the sink
//!     → upgrade review (may terminate the HTTP exchange)
//!     → body resolved
//!     → domain released
//!     → exactly one terminal sink action performed
//! ```
//!
//! # Design Decisions
//! - The domain is held for callback and interpretation only; the terminal
//!   network action runs after release
//! - Per-request failures degrade to an error status, never a panic
//! - Exactly one terminal action per request across every code path

pub mod domain;
pub mod driver;

pub use domain::AppDomain;
pub use driver::Gateway;
