//! Prefix tree of path segments.
//!
//! # Data Flow
//! ```text
//! Bind:
//!     normalized path + handler chain
//!     → node.rs::Node::chain (one node per segment, handlers on the leaf)
//!     → node.rs::Node::conflict (reject ambiguous registrations)
//!     → node.rs::Node::add (merge into the scope tree, keep sibling order)
//!     → endpoint.rs::EndpointMut (attach description, schemas, metadata)
//!
//! Match:
//!     request segments ["", "items", "42"]
//!     → node.rs::Node::find (depth-first, siblings in stored order)
//!     → endpoint node + captured params, or None
//! ```
//!
//! # Design Decisions
//! - Sibling order is static, then param, then wildcard; first success wins,
//!   so priority never needs to be recomputed per request
//! - Static siblings are prepended, so the most recent one is tried first
//! - Trees are only mutated while binding; matching borrows immutably

pub mod endpoint;
pub mod node;

pub use endpoint::{Attachments, Endpoint, EndpointMut, RouteSummary};
pub use node::Conflict;
pub(crate) use node::Node;
