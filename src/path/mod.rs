//! Path normalisation and segment classification.
//!
//! # Data Flow
//! ```text
//! Bind (build time):
//!     raw path "//users/{id}/"
//!     → normalize.rs ("users/{id}")
//!     → split on '/'
//!     → segment.rs (classify each segment: static | param | wildcard)
//!     → tree builds one node per segment
//!
//! Match (request time):
//!     request path "/users/42"
//!     → normalize.rs::split_segments (["", "users", "42"])
//!     → tree walks one node per segment
//! ```
//!
//! # Design Decisions
//! - Pure functions, no allocation beyond the normalised copy
//! - Classification is total over valid input; anything else is rejected
//!   at bind time and never reaches the matcher

pub mod normalize;
pub mod segment;

pub use normalize::{normalize, split_segments};
pub use segment::{classify, is_param, is_static, is_wildcard, InvalidSegment, SegmentKind};
