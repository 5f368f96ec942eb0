//! Handler chains and the `next` continuation.
//!
//! # Data Flow
//! ```text
//! Bind (build time):
//!     router pre-handlers ++ bind handlers
//!     → sequence.rs (HandlerChain stored on the endpoint node)
//!     → insert_global_pre_handlers prepends deduplicated handlers later
//!
//! Dispatch (per call, driven by an external loop):
//!     endpoint.chain()            install cursor at the first handler
//!     → next.rs::run / try_run    advance cursor, invoke handler
//!     → handler may call next.run / next.try_run again
//!     → cursor exhausted: panic (run) or NotImplemented (try_run)
//! ```
//!
//! # Design Decisions
//! - The cursor is an explicit value owned by one call, never shared
//! - The cursor only moves forward; a handler cannot re-enter itself
//! - Handler identity is an explicit key (`Identify::Id`), not a printed form

pub mod handler;
pub mod next;
pub mod sequence;

pub use handler::{collapse_type_name, FallibleHandler, FnHandler, Handler, Identify};
pub use next::{Next, NotImplemented};
pub use sequence::HandlerChain;
