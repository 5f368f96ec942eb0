//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (build time):
//!     Router::group / Router::using (derive base path + pre-handlers)
//!     → Router::bind(scope, path, handlers)
//!     → conflict check against the global tree
//!     → merge into the scope tree
//!     → EndpointMut (attachments)
//!
//! Incoming Request (scope, path):
//!     → routes.rs (select scope tree, fall back to global)
//!     → tree::Node::find (segment walk)
//!     → params.rs (percent-decode captures)
//!     → Return: (Endpoint, Params) or (None, empty Params)
//! ```
//!
//! # Design Decisions
//! - Routers borrow the forest mutably, so no request can be matched while
//!   a route is still being registered
//! - Once built, `Routes` is plain immutable data and safe to share
//! - Deterministic: same input always matches same endpoint
//! - Registration errors abort the bind and leave the trees unchanged

pub mod error;
pub mod params;
pub mod router;
pub mod routes;

pub use error::RouteError;
pub use params::Params;
pub use router::Router;
pub use routes::{Routes, GLOBAL_SCOPE};
