//! The scope → tree forest and the request-time surface.

use std::collections::BTreeMap;

use crate::chain::{HandlerChain, Identify};
use crate::path::split_segments;
use crate::routing::error::RouteError;
use crate::routing::params::{decode_params, Params};
use crate::routing::router::Router;
use crate::tree::{Endpoint, EndpointMut, Node};

/// Scope key of the global tree, consulted whenever a scope has no match.
pub const GLOBAL_SCOPE: &str = "";

/// All scope trees of a router.
///
/// Build it through [`Routes::router`]; once every [`Router`] borrowing it
/// has been dropped it is immutable and can be shared across threads.
#[derive(Debug)]
pub struct Routes<H> {
    global: Node<H>,
    scoped: BTreeMap<String, Node<H>>,
}

impl<H> Default for Routes<H> {
    fn default() -> Self {
        Self {
            global: Node::root(),
            scoped: BTreeMap::new(),
        }
    }
}

impl<H> Routes<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root router: empty base path, no pre-handlers.
    pub fn router(&mut self) -> Router<'_, H> {
        Router::new(self)
    }

    /// Registered scopes, global first.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(GLOBAL_SCOPE).chain(self.scoped.keys().map(String::as_str))
    }

    /// Number of endpoints across all scopes.
    pub fn len(&self) -> usize {
        self.trees().map(|(_, root)| root.endpoints().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn trees(&self) -> impl Iterator<Item = (&str, &Node<H>)> {
        std::iter::once((GLOBAL_SCOPE, &self.global))
            .chain(self.scoped.iter().map(|(scope, root)| (scope.as_str(), root)))
    }

    /// Resolve `(scope, path)` to an endpoint and its decoded params.
    ///
    /// Scopes are case-insensitive. An unknown scope, or a scope without a
    /// match, falls back to the global tree. Without any match the params
    /// are empty.
    pub fn match_route(&self, scope: &str, path: &str) -> (Option<Endpoint<'_, H>>, Params) {
        let scope = scope.to_uppercase();
        let segments = split_segments(path);

        let found = self
            .scoped
            .get_key_value(scope.as_str())
            .and_then(|(key, root)| root.find(&segments).map(|hit| (key.as_str(), hit)))
            .or_else(|| self.global.find(&segments).map(|hit| (GLOBAL_SCOPE, hit)));

        match found {
            Some((scope, (node, captures))) => {
                (Some(Endpoint::new(scope, node)), decode_params(captures))
            }
            None => (None, Params::new()),
        }
    }

    /// Every registered scope in which `path` would match.
    ///
    /// Lets a dispatch loop tell "method not allowed" from "not found".
    pub fn match_scopes(&self, path: &str) -> Vec<&str> {
        self.scopes()
            .filter(|scope| self.match_route(scope, path).0.is_some())
            .collect()
    }

    /// All endpoints, sorted by path.
    pub fn list_routes(&self) -> Vec<Endpoint<'_, H>> {
        let mut endpoints: Vec<Endpoint<'_, H>> = self
            .trees()
            .flat_map(|(scope, root)| {
                root.endpoints()
                    .into_iter()
                    .map(move |node| Endpoint::new(scope, node))
            })
            .collect();
        endpoints.sort_by(|a, b| a.path().cmp(b.path()));
        endpoints
    }

    fn tree_mut(&mut self, scope: &str) -> &mut Node<H> {
        if scope.is_empty() {
            return &mut self.global;
        }
        self.scoped
            .entry(scope.to_string())
            .or_insert_with(Node::root)
    }

    /// Attach `handlers` to the root of `scope`. The root can only be bound
    /// once, and not at all if the global root is already bound.
    pub(crate) fn bind_root(&mut self, scope: &str, handlers: HandlerChain<H>) -> Result<(), RouteError> {
        let scope_bound = self.scoped.get(scope).is_some_and(Node::is_endpoint);
        if scope_bound || self.global.is_endpoint() {
            return Err(RouteError::DuplicateRoot {
                scope: scope.to_string(),
            });
        }
        self.tree_mut(scope).set_handlers(handlers);
        Ok(())
    }

    /// Merge a node chain into the tree of `scope`.
    ///
    /// Outside the global scope the chain is first checked against the
    /// global tree, since global routes apply to every scope.
    pub(crate) fn merge(&mut self, scope: &str, candidate: Node<H>) -> Result<(), RouteError> {
        if !scope.is_empty() {
            if let Some(conflict) = self.global.conflicting_child(&candidate) {
                return Err(RouteError::conflict(scope, conflict));
            }
        }
        self.tree_mut(scope)
            .add(candidate)
            .map_err(|conflict| RouteError::conflict(scope, conflict))
    }

    pub(crate) fn node_mut(&mut self, scope: &str, path: &str) -> Option<&mut Node<H>> {
        let root = if scope.is_empty() {
            &mut self.global
        } else {
            self.scoped.get_mut(scope)?
        };
        root.locate_mut(path)
    }

    pub(crate) fn endpoint_mut(&mut self, scope: &str, path: &str) -> Option<EndpointMut<'_, H>> {
        let (scope, root) = if scope.is_empty() {
            (GLOBAL_SCOPE, &mut self.global)
        } else {
            let (key, root) = self.scoped.iter_mut().find(|(key, _)| key.as_str() == scope)?;
            (key.as_str(), root)
        };
        let node = root.locate_mut(path)?;
        Some(EndpointMut::new(scope, node))
    }
}

impl<H: Identify> Routes<H> {
    /// Log every route at debug level.
    pub fn log_routes(&self) {
        for endpoint in self.list_routes() {
            tracing::debug!(
                scope = %endpoint.scope(),
                path = %endpoint.path(),
                handlers = %endpoint.handler_path(),
                "Route"
            );
        }
    }
}
