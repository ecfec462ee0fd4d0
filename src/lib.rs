//! Application-to-engine request bridge.
//!
//! Mediates between an embedding HTTP/WebSocket engine and a
//! synchronous application callback: engine requests become key/value
//! environments, application responses become typed send instructions,
//! and protocol upgrades are negotiated through explicit markers.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌────────────────────────────────────────────────────┐
//!                       │                     GATEWAY                        │
//!                       │                                                    │
//!    Engine Request     │  ┌─────────┐    ┌─────────┐    ┌──────────────┐   │
//!    ───────────────────┼─▶│ engine  │───▶│   env   │───▶│   dispatch   │   │
//!                       │  │ request │    │ builder │    │   driver     │   │
//!                       │  └─────────┘    └─────────┘    └──────┬───────┘   │
//!                       │                                       │           │
//!                       │                                       ▼           │
//!                       │                               ┌──────────────┐    │
//!                       │                               │ app callback │    │
//!                       │                               │ (serialized) │    │
//!                       │                               └──────┬───────┘    │
//!                       │                                       │           │
//!                       │                                       ▼           │
//!    Engine Sink        │  ┌─────────┐    ┌─────────┐    ┌──────────────┐   │
//!    ◀──────────────────┼──│ request │◀───│response │◀───│   upgrade    │   │
//!                       │  │  sink   │    │interpret│    │  negotiator  │   │
//!                       │  └─────────┘    └─────────┘    └──────────────┘   │
//!                       │                                                    │
//!                       │  ┌──────────────────────────────────────────────┐ │
//!                       │  │           Cross-Cutting Concerns             │ │
//!                       │  │  ┌─────────┐ ┌────────────┐ ┌─────────────┐  │ │
//!                       │  │  │ config  │ │ connection │ │ observa-    │  │ │
//!                       │  │  │         │ │  adapter   │ │ bility      │  │ │
//!                       │  │  └─────────┘ └────────────┘ └─────────────┘  │ │
//!                       │  └──────────────────────────────────────────────┘ │
//!                       └────────────────────────────────────────────────────┘
//! ```
//!
//! # Guarantees
//!
//! - Application code runs inside a single serialization domain
//! - Exactly one terminal instruction is issued per request
//! - Connection events are delivered in order, close exactly once
//! - Configuration is resolved once at bind time

// Core subsystems
pub mod dispatch;
pub mod engine;
pub mod env;
pub mod response;
pub mod upgrade;

// Application surface
pub mod app;
pub mod connection;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod observability;

pub use app::{AppCallback, ConnectionHandler, Message, RawSocketHandler};
pub use config::{load_config, ConfigError, ListenConfig, Port, ValidationError};
pub use connection::{Connection, ConnectionEvent, ConnectionId, ConnectionKind, SessionId};
pub use dispatch::{AppDomain, Gateway};
pub use engine::{
    BodyHandle, ParsedRequest, ProtocolHandle, RawSocket, RequestSink, UpgradeClass,
};
pub use env::{EnvValue, RequestEnv};
pub use error::GatewayError;
pub use observability::init_logging;
pub use response::{BodyStream, BodyValue, ResponseHeaders, ResponseValue, StatusValue};
pub use upgrade::UpgradeIntent;
