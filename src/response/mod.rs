//! Response interpretation subsystem.
//!
//! # Data Flow
//! ```text
//! application callback returns ResponseValue (value.rs)
//!     → interpret (interpret.rs): status parsed, headers lowercased and
//!       newline-split, sendfile override extracted
//!     → Dispatch Driver writes status + headers to the sink
//!     → upgrade review runs (may consume the response entirely)
//!     → resolve_body: chunk sequence / buffer / stream collapsed into one
//!       contiguous buffer or an empty response
//! ```
//!
//! # Design Decisions
//! - The response shape is validated once here at the boundary; malformed
//!   responses map to a 500 for that request only
//! - Streaming sources are drained eagerly and closed, so external
//!   resources are released even though the engine transmits a buffer
//! - Body resolution is deferred until after upgrade review; an upgraded
//!   request closes its body without draining it

pub mod interpret;
pub mod value;

pub use interpret::{
    interpret, resolve_body, PendingBody, ResolvedBody, ResponseDescriptor,
};
pub use value::{BodyStream, BodyValue, ResponseHeaders, ResponseValue, StatusValue};
