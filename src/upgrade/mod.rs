//! Upgrade negotiation subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatch Driver (headers finalized, body not yet sent)
//!     → classify: environment markers + handshake class → UpgradeIntent
//!     → review: perform the winning intent's handshake actions
//!         hijack-callback → finish, hijack, invoke callback
//!         hijack-raw-io   → finish only
//!         tcp-takeover    → hijack, finish, attach handler
//!         websocket/sse   → register a Connection adapter
//!     → upgraded? driver closes the body value and stops
//! ```
//!
//! # Design Decisions
//! - Precedence is fixed: explicit hijack beats explicit takeover beats
//!   protocol-negotiated upgrades
//! - A status of 300 or above forces `UpgradeIntent::None` regardless of
//!   markers
//! - A negotiated protocol without a matching handler is simply
//!   unavailable, not an error; the request falls through to ordinary
//!   body transmission

pub mod negotiator;

pub use negotiator::{classify, review, UpgradeIntent};
