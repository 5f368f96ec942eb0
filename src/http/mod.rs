//! HTTP dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum fallback handler, TraceLayer)
//!     → Routes::match_route(method, path)
//!         no match → Routes::match_scopes → 405 + Allow, or 404
//!     → Endpoint::chain() (fresh cursor per request)
//!     → stage.rs (pass / reply / reject)
//!         chain exhausted → 501
//!     → Send JSON response to client
//! ```
//!
//! # Design Decisions
//! - The route forest is built once and shared read-only via Arc
//! - Each request gets its own chain cursor; nothing is shared between calls

pub mod server;
pub mod stage;

pub use server::{app, serve, shutdown_signal};
pub use stage::{DispatchError, Exchange, Reply, Stage};
