//! Registration errors.

use thiserror::Error;

use crate::path::InvalidSegment;
use crate::tree::Conflict;

/// Errors that abort a route registration.
///
/// These only come from programming mistakes in route setup, never from
/// live traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// `bind` was called with an empty path.
    #[error("path is empty")]
    EmptyPath,

    /// `bind` was called without handlers.
    #[error("handlers cannot be empty")]
    EmptyHandlers,

    /// A path segment is neither static, param nor wildcard.
    #[error(transparent)]
    InvalidSegment(#[from] InvalidSegment),

    /// The new route would make some request path ambiguous.
    #[error("conflict in scope {scope:?}: {existing}, {incoming}")]
    Conflict {
        scope: String,
        existing: String,
        incoming: String,
    },

    /// `group("/")` would only alias the parent router.
    #[error("not allowed to create group \"/\"")]
    RootGroup,

    /// The scope root, or the global root, is already an endpoint.
    #[error("root of scope {scope:?} is already bound")]
    DuplicateRoot { scope: String },

    /// A handler is already among the router's pre-handlers.
    #[error("duplicate handler: {handler}")]
    DuplicateHandler { handler: String },

    /// A bound endpoint could not be found again in its tree.
    #[error("no endpoint at {path:?} in scope {scope:?}")]
    NotBound { scope: String, path: String },
}

impl RouteError {
    pub(crate) fn conflict(scope: &str, conflict: Conflict) -> Self {
        RouteError::Conflict {
            scope: scope.to_string(),
            existing: conflict.existing,
            incoming: conflict.incoming,
        }
    }
}
