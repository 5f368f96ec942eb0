//! Endpoint views over tree nodes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chain::{HandlerChain, Identify, Next};
use crate::path::SegmentKind;
use crate::tree::node::Node;

/// Descriptive payloads carried by an endpoint.
///
/// Never read by matching or conflict detection; set and consumed by
/// documentation tooling and dispatch layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachments {
    pub description: String,
    pub sensitive: bool,
    /// Input schema.
    pub input: Option<Value>,
    /// Output schemas, in declaration order.
    pub outputs: Vec<Value>,
    pub metadata: Option<Value>,
}

/// Serializable description of one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub scope: String,
    pub path: String,
    pub handlers: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Read-only view of an endpoint: a scope plus the node it resolves to.
pub struct Endpoint<'a, H> {
    scope: &'a str,
    node: &'a Node<H>,
}

impl<H> Clone for Endpoint<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Endpoint<'_, H> {}

impl<H> fmt::Debug for Endpoint<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("scope", &self.scope)
            .field("path", &self.node.path())
            .field("handlers", &self.node.handlers().len())
            .finish()
    }
}

impl<'a, H> Endpoint<'a, H> {
    pub(crate) fn new(scope: &'a str, node: &'a Node<H>) -> Self {
        Self { scope, node }
    }

    /// Scope of the tree holding this endpoint; empty for the global tree.
    pub fn scope(&self) -> &'a str {
        self.scope
    }

    /// Normalized pattern path, e.g. `items/{id}`.
    pub fn path(&self) -> &'a str {
        self.node.path()
    }

    /// Kind of the last segment: a wildcard endpoint absorbs any suffix.
    pub fn kind(&self) -> SegmentKind {
        self.node.kind()
    }

    pub fn handlers(&self) -> &'a HandlerChain<H> {
        self.node.handlers()
    }

    /// Head of the handler chain.
    pub fn handler(&self) -> Option<&'a H> {
        self.node.handlers().first()
    }

    /// A fresh cursor for one call through this endpoint's handlers.
    pub fn chain(&self) -> Next<'a, H> {
        self.node.handlers().start()
    }

    pub fn attachments(&self) -> &'a Attachments {
        self.node.attachments()
    }

    pub fn description(&self) -> &'a str {
        &self.node.attachments().description
    }

    pub fn is_sensitive(&self) -> bool {
        self.node.attachments().sensitive
    }

    pub fn input(&self) -> Option<&'a Value> {
        self.node.attachments().input.as_ref()
    }

    pub fn outputs(&self) -> &'a [Value] {
        &self.node.attachments().outputs
    }

    pub fn metadata(&self) -> Option<&'a Value> {
        self.node.attachments().metadata.as_ref()
    }
}

impl<H: Identify> Endpoint<'_, H> {
    /// Diagnostic name of the handler chain, e.g. `log, auth, get_item`.
    pub fn handler_path(&self) -> String {
        self.node.handlers().names()
    }

    pub fn summary(&self) -> RouteSummary {
        let attachments = self.attachments();
        RouteSummary {
            scope: self.scope.to_string(),
            path: format!("/{}", self.path()),
            handlers: self.handler_path(),
            description: attachments.description.clone(),
            sensitive: attachments.sensitive,
            metadata: attachments.metadata.clone(),
        }
    }
}

/// Mutable view returned by `bind`, used to set attachments.
pub struct EndpointMut<'a, H> {
    scope: &'a str,
    node: &'a mut Node<H>,
}

impl<'a, H> EndpointMut<'a, H> {
    pub(crate) fn new(scope: &'a str, node: &'a mut Node<H>) -> Self {
        Self { scope, node }
    }

    pub fn as_endpoint(&self) -> Endpoint<'_, H> {
        Endpoint::new(self.scope, &*self.node)
    }

    pub fn scope(&self) -> &str {
        self.scope
    }

    pub fn path(&self) -> &str {
        self.node.path()
    }

    pub fn describe(&mut self, description: impl Into<String>) -> &mut Self {
        self.node.attachments_mut().description = description.into();
        self
    }

    pub fn set_sensitive(&mut self, sensitive: bool) -> &mut Self {
        self.node.attachments_mut().sensitive = sensitive;
        self
    }

    pub fn set_input(&mut self, schema: Value) -> &mut Self {
        self.node.attachments_mut().input = Some(schema);
        self
    }

    pub fn add_output(&mut self, schema: Value) -> &mut Self {
        self.node.attachments_mut().outputs.push(schema);
        self
    }

    pub fn set_metadata(&mut self, metadata: Value) -> &mut Self {
        self.node.attachments_mut().metadata = Some(metadata);
        self
    }

    /// Replace all attachments at once.
    pub fn attach(&mut self, attachments: Attachments) -> &mut Self {
        *self.node.attachments_mut() = attachments;
        self
    }
}

impl<H> fmt::Debug for EndpointMut<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_endpoint().fmt(f)
    }
}
