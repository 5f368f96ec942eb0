//! Route manifest schema.
//!
//! A manifest declares named handler stages and the routes that chain them.
//! All types derive Serde traits for deserialization from TOML.
//!
//! ```toml
//! use = ["log"]
//!
//! [server]
//! bind_address = "127.0.0.1:8080"
//!
//! [[handlers]]
//! name = "log"
//! action = "pass"
//!
//! [[handlers]]
//! name = "get_item"
//! action = "reply"
//!
//! [[groups]]
//! prefix = "/api"
//!
//! [[groups.routes]]
//! scope = "GET"
//! path = "/items/{id}"
//! handlers = ["get_item"]
//! ```

use serde::{Deserialize, Serialize};

use crate::tree::Attachments;

/// Root of a route manifest.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Manifest {
    pub logging: LoggingConfig,

    pub server: ServerConfig,

    /// Named handler stages referenced by routes.
    pub handlers: Vec<HandlerConfig>,

    /// Routes and groups of the root router.
    #[serde(flatten)]
    pub root: RouteTable,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset (trace, debug, info, warn, error).
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
        }
    }
}

/// Output format of the `fmt` layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
}

/// Listener configuration for `routectl serve`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// A named handler stage.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandlerConfig {
    /// Unique name; also the handler's identity.
    pub name: String,

    pub action: HandlerAction,

    /// Response status for `reply` (default 200) and `reject` (default 403).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Message included in the response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// What a stage does when the chain reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerAction {
    /// Record the stage and continue with the next handler.
    Pass,
    /// Answer the request, ending the chain.
    Reply,
    /// Fail the request with an error status, ending the chain.
    Reject,
}

/// Routes bound through one router, plus the routers derived from it.
///
/// `global` handlers are inserted after the routes of this table are
/// bound, so they wrap those routes and every later bind through the same
/// router, but not the routes of nested groups.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouteTable {
    /// Pre-handlers added with `using`.
    #[serde(rename = "use", skip_serializing_if = "Vec::is_empty")]
    pub pre_handlers: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub global: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteConfig>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupConfig>,
}

/// A derived router with its own path prefix.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GroupConfig {
    pub prefix: String,

    #[serde(flatten)]
    pub table: RouteTable,
}

/// One route binding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Scope, e.g. an HTTP method. Empty or absent binds into the global tree.
    #[serde(default)]
    pub scope: String,

    pub path: String,

    /// Handler names, run after the router's pre-handlers.
    pub handlers: Vec<String>,

    #[serde(flatten)]
    pub attachments: Attachments,
}

impl RouteConfig {
    /// Short label used in validation messages, e.g. `GET /items`.
    pub fn label(&self) -> String {
        let scope = if self.scope.is_empty() { "*" } else { &self.scope };
        format!("{} {}", scope, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let manifest: Manifest = toml::from_str("").unwrap();
        assert_eq!(manifest.logging.level, "info");
        assert_eq!(manifest.logging.format, LogFormat::Full);
        assert_eq!(manifest.server.bind_address, "127.0.0.1:8080");
        assert!(manifest.handlers.is_empty());
        assert!(manifest.root.routes.is_empty());
    }

    #[test]
    fn test_parse_nested_groups() {
        let manifest: Manifest = toml::from_str(
            r#"
            use = ["log"]
            global = ["audit"]

            [logging]
            format = "compact"

            [[handlers]]
            name = "log"
            action = "pass"

            [[handlers]]
            name = "deny"
            action = "reject"
            status = 401
            body = "login first"

            [[routes]]
            scope = "GET"
            path = "/health"
            handlers = ["ok"]
            description = "Liveness"

            [[groups]]
            prefix = "/api"
            use = ["auth"]

            [[groups.routes]]
            path = "/items/{id}"
            handlers = ["get_item"]
            sensitive = true
            outputs = [{ type = "object" }]

            [[groups.groups]]
            prefix = "v2"
            "#,
        )
        .unwrap();

        assert_eq!(manifest.logging.format, LogFormat::Compact);
        assert_eq!(manifest.root.pre_handlers, vec!["log"]);
        assert_eq!(manifest.root.global, vec!["audit"]);
        assert_eq!(manifest.handlers[1].action, HandlerAction::Reject);
        assert_eq!(manifest.handlers[1].status, Some(401));

        let health = &manifest.root.routes[0];
        assert_eq!(health.label(), "GET /health");
        assert_eq!(health.attachments.description, "Liveness");

        let api = &manifest.root.groups[0];
        assert_eq!(api.prefix, "/api");
        assert_eq!(api.table.pre_handlers, vec!["auth"]);
        let item = &api.table.routes[0];
        assert_eq!(item.label(), "* /items/{id}");
        assert!(item.attachments.sensitive);
        assert_eq!(item.attachments.outputs[0]["type"], "object");
        assert_eq!(api.table.groups[0].prefix, "v2");
    }
}
