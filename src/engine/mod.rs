//! Network engine boundary.
//!
//! The engine (TCP/TLS acceptor, HTTP parser, WebSocket/SSE framer) lives
//! outside this crate. This module defines what crosses the boundary.
//!
//! # Data Flow
//! ```text
//! engine parses a request
//!     → ParsedRequest (request.rs) handed to the Dispatch Driver
//!     → driver issues instructions on a RequestSink (sink.rs)
//!     → engine transmits asynchronously
//!
//! on protocol upgrade:
//!     → driver registers an Arc<Connection> via the sink
//!     → engine drives Connection::fire with lifecycle events
//! ```
//!
//! # Design Decisions
//! - The sink is a plain object-safe trait; tests drive the gateway with a
//!   mock sink, no network required
//! - Raw sockets, protocol handles and body readers cross the boundary as
//!   opaque numeric tokens owned by the engine
//! - Each sink instruction is irreversible once executed; the driver issues
//!   at most one terminal action per request

pub mod request;
pub mod sink;

pub use request::{BodyHandle, ParsedRequest, UpgradeClass};
pub use sink::{ProtocolHandle, RawSocket, RequestSink};
