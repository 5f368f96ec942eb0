//! Trie request router with handler chains.
//!
//! Maps a `(scope, path)` pair, such as an HTTP method and URL path, to the
//! handler chain registered for it plus the captured path parameters.
//!
//! # Architecture Overview
//!
//! ```text
//!   build time                                  request time
//!   ──────────                                  ────────────
//!   config (manifest)                           http (axum fallback)
//!        │                                            │
//!        ▼                                            ▼
//!   routing::Router ── group / using / bind     routing::Routes::match_route
//!        │                                            │
//!        ▼                                            ▼
//!   tree::Node::add ◀── conflict check          tree::Node::find
//!        │                                            │
//!        ▼                                            ▼
//!   path (normalize, classify)                  chain::Next (run / try_run)
//! ```
//!
//! # Example
//!
//! ```
//! use trie_router::chain::FnHandler;
//! use trie_router::routing::Routes;
//!
//! type H = FnHandler<String, String>;
//!
//! let mut routes: Routes<H> = Routes::new();
//! {
//!     let mut router = routes.router();
//!     let mut api = router.group("/api").unwrap();
//!     let mut api = api.using([H::new("log", |next, input: String| next.run(format!("log>{input}")))]);
//!     api.bind("GET", "/items/{id}", [H::new("get", |_, input| format!("{input}>get"))])
//!         .unwrap();
//! }
//!
//! let (endpoint, params) = routes.match_route("GET", "/api/items/42");
//! let endpoint = endpoint.unwrap();
//! assert_eq!(params["id"], "42");
//! assert_eq!(endpoint.handler_path(), "log, get");
//! assert_eq!(endpoint.chain().run("req".to_string()), "log>req>get");
//! ```

// Core
pub mod chain;
pub mod path;
pub mod routing;
pub mod tree;

// Surfaces
pub mod config;
pub mod http;
pub mod observability;

pub use chain::{FallibleHandler, Handler, HandlerChain, Identify, Next, NotImplemented};
pub use routing::{Params, RouteError, Router, Routes};
pub use tree::{Attachments, Endpoint, EndpointMut};
