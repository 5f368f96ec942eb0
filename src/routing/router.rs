//! Build-time router facade: grouping, pre-handlers and binding.

use crate::chain::{HandlerChain, Identify};
use crate::path::normalize;
use crate::routing::error::RouteError;
use crate::routing::params::Params;
use crate::routing::routes::Routes;
use crate::tree::{Endpoint, EndpointMut, Node};

/// A view over a [`Routes`] forest with its own base path and pre-handlers.
///
/// Derived routers (from [`Router::group`] and [`Router::using`]) share the
/// forest but copy the pre-handler list, so later changes to one router's
/// list never leak into another's.
#[derive(Debug)]
pub struct Router<'r, H> {
    routes: &'r mut Routes<H>,
    base_path: String,
    pre_handlers: Vec<H>,
    /// `(scope, path)` of every endpoint bound directly through this router.
    bound: Vec<(String, String)>,
}

impl<'r, H> Router<'r, H> {
    pub(crate) fn new(routes: &'r mut Routes<H>) -> Self {
        Self {
            routes,
            base_path: String::new(),
            pre_handlers: Vec::new(),
            bound: Vec::new(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn pre_handlers(&self) -> &[H] {
        &self.pre_handlers
    }

    pub fn match_route(&self, scope: &str, path: &str) -> (Option<Endpoint<'_, H>>, Params) {
        self.routes.match_route(scope, path)
    }

    pub fn match_scopes(&self, path: &str) -> Vec<&str> {
        self.routes.match_scopes(path)
    }

    pub fn list_routes(&self) -> Vec<Endpoint<'_, H>> {
        self.routes.list_routes()
    }
}

impl<H: Identify + Clone> Router<'_, H> {
    fn derive(&mut self, base_path: String) -> Router<'_, H> {
        Router {
            routes: &mut *self.routes,
            base_path,
            pre_handlers: self.pre_handlers.clone(),
            bound: Vec::new(),
        }
    }

    /// Derive a router whose base path is this one's plus `path`.
    ///
    /// An empty `path` keeps the base path; `"/"` is rejected.
    pub fn group(&mut self, path: &str) -> Result<Router<'_, H>, RouteError> {
        if path == "/" {
            return Err(RouteError::RootGroup);
        }
        let base_path = if path.is_empty() {
            self.base_path.clone()
        } else {
            normalize(&format!("{}/{}", self.base_path, path))
        };
        Ok(self.derive(base_path))
    }

    /// Derive a router whose pre-handlers gain `handlers`, skipping any
    /// already in its list.
    pub fn using(&mut self, handlers: impl IntoIterator<Item = H>) -> Router<'_, H> {
        let base_path = self.base_path.clone();
        let mut derived = self.derive(base_path);
        for handler in handlers {
            if !derived.contains_handler(&handler) {
                derived.pre_handlers.push(handler);
            }
        }
        derived
    }

    /// Returns true if a handler with the same identity is among this
    /// router's pre-handlers.
    pub fn contains_handler(&self, handler: &H) -> bool {
        let id = handler.id();
        self.pre_handlers.iter().any(|h| h.id() == id)
    }

    /// Register `handlers` at `path` under `scope`.
    ///
    /// The endpoint's chain is this router's pre-handlers followed by
    /// `handlers`. Scopes are stored uppercased. On error nothing is
    /// registered.
    pub fn bind(
        &mut self,
        scope: &str,
        path: &str,
        handlers: impl IntoIterator<Item = H>,
    ) -> Result<EndpointMut<'_, H>, RouteError> {
        if path.is_empty() {
            return Err(RouteError::EmptyPath);
        }
        let handlers: Vec<H> = handlers.into_iter().collect();
        if handlers.is_empty() {
            return Err(RouteError::EmptyHandlers);
        }

        let scope = scope.to_uppercase();
        let literal = normalize(&format!("{}/{}", self.base_path, path));
        let chain: HandlerChain<H> = self.pre_handlers.iter().cloned().chain(handlers).collect();

        if literal.is_empty() {
            self.routes.bind_root(&scope, chain)?;
        } else {
            let candidate = Node::chain(&literal, chain)?;
            self.routes.merge(&scope, candidate)?;
        }
        tracing::debug!(scope = %scope, path = %literal, "Bound route");

        self.bound.push((scope.clone(), literal.clone()));
        self.routes
            .endpoint_mut(&scope, &literal)
            .ok_or(RouteError::NotBound {
                scope,
                path: literal,
            })
    }

    /// Prepend `handlers` to every endpoint bound through this router and
    /// to its pre-handlers, so later binds pick them up too.
    ///
    /// Fails without changing anything if any handler is already among
    /// this router's pre-handlers.
    pub fn insert_global_pre_handlers(
        &mut self,
        handlers: impl IntoIterator<Item = H>,
    ) -> Result<(), RouteError> {
        let handlers: Vec<H> = handlers.into_iter().collect();
        if let Some(duplicate) = handlers.iter().find(|h| self.contains_handler(h)) {
            return Err(RouteError::DuplicateHandler {
                handler: duplicate.display_name(),
            });
        }

        for (scope, path) in &self.bound {
            if let Some(node) = self.routes.node_mut(scope, path) {
                node.handlers_mut().insert_pre_handlers(&handlers);
            }
        }

        let mut pre_handlers = handlers;
        pre_handlers.append(&mut self.pre_handlers);
        self.pre_handlers = pre_handlers;
        Ok(())
    }
}
