//! Manifest-defined handler stages and the values they pass along.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::chain::{FallibleHandler, Identify, Next, NotImplemented};
use crate::config::schema::{HandlerAction, HandlerConfig};
use crate::config::validation::{effective_status, ValidationError};
use crate::routing::Params;

/// One call flowing through an endpoint's chain.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub scope: String,
    pub path: String,
    /// Pattern of the matched endpoint, e.g. `items/{id}`.
    pub route: String,
    pub params: Params,
    /// Names of the stages that ran so far.
    pub trace: Vec<String>,
}

impl Exchange {
    pub fn new(scope: &str, path: &str, route: &str, params: Params) -> Self {
        Self {
            scope: scope.to_string(),
            path: path.to_string(),
            route: route.to_string(),
            params,
            trace: Vec::new(),
        }
    }
}

/// A successful chain result.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Why a chain did not produce a [`Reply`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    NotImplemented(#[from] NotImplemented),

    #[error("rejected by {stage}: {message}")]
    Rejected {
        stage: String,
        status: StatusCode,
        message: String,
    },
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            DispatchError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Pass,
    Reply(StatusCode),
    Reject(StatusCode),
}

/// A named handler declared in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    name: Arc<str>,
    action: Action,
    body: Option<String>,
}

impl Stage {
    pub fn pass(name: &str) -> Self {
        Self {
            name: name.into(),
            action: Action::Pass,
            body: None,
        }
    }

    pub fn reply(name: &str, status: StatusCode) -> Self {
        Self {
            action: Action::Reply(status),
            ..Self::pass(name)
        }
    }

    pub fn reject(name: &str, status: StatusCode) -> Self {
        Self {
            action: Action::Reject(status),
            ..Self::pass(name)
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn from_config(config: &HandlerConfig) -> Result<Self, ValidationError> {
        let status = effective_status(config)?;
        let stage = match config.action {
            HandlerAction::Pass => Self::pass(&config.name),
            HandlerAction::Reply => Self::reply(&config.name, status),
            HandlerAction::Reject => Self::reject(&config.name, status),
        };
        Ok(Self {
            body: config.body.clone(),
            ..stage
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Identify for Stage {
    type Id = Arc<str>;

    fn id(&self) -> Self::Id {
        self.name.clone()
    }

    fn display_name(&self) -> String {
        self.name.to_string()
    }
}

impl FallibleHandler<Exchange, Reply, DispatchError> for Stage {
    fn handle(&self, next: &mut Next<'_, Self>, mut exchange: Exchange) -> Result<Reply, DispatchError> {
        exchange.trace.push(self.name.to_string());
        match self.action {
            Action::Pass => next.try_run(exchange),
            Action::Reply(status) => Ok(Reply {
                status,
                body: json!({
                    "scope": exchange.scope,
                    "path": exchange.path,
                    "route": exchange.route,
                    "params": exchange.params,
                    "trace": exchange.trace,
                    "message": self.body,
                }),
            }),
            Action::Reject(status) => Err(DispatchError::Rejected {
                stage: self.name.to_string(),
                status,
                message: self
                    .body
                    .clone()
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("rejected").to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::HandlerChain;

    fn run(stages: Vec<Stage>) -> Result<Reply, DispatchError> {
        let chain = HandlerChain::new(stages);
        let mut params = Params::new();
        params.insert("id".to_string(), "7".to_string());
        let exchange = Exchange::new("GET", "/items/7", "items/{id}", params);
        chain.start().try_run(exchange)
    }

    #[test]
    fn test_pass_then_reply() {
        let reply = run(vec![
            Stage::pass("log"),
            Stage::pass("auth"),
            Stage::reply("get_item", StatusCode::OK).with_body("found"),
        ])
        .unwrap();

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["trace"], json!(["log", "auth", "get_item"]));
        assert_eq!(reply.body["params"]["id"], "7");
        assert_eq!(reply.body["route"], "items/{id}");
        assert_eq!(reply.body["message"], "found");
    }

    #[test]
    fn test_reject_stops_chain() {
        let err = run(vec![
            Stage::reject("deny", StatusCode::UNAUTHORIZED),
            Stage::reply("never", StatusCode::OK),
        ])
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "rejected by deny: Unauthorized");
    }

    #[test]
    fn test_exhausted_chain_is_not_implemented() {
        let err = run(vec![Stage::pass("log")]).unwrap_err();
        assert_eq!(err, DispatchError::NotImplemented(NotImplemented));
        assert_eq!(err.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn test_from_config_uses_default_status() {
        let config = HandlerConfig {
            name: "deny".into(),
            action: HandlerAction::Reject,
            status: None,
            body: Some("go away".into()),
        };
        let stage = Stage::from_config(&config).unwrap();
        assert_eq!(
            stage,
            Stage::reject("deny", StatusCode::FORBIDDEN).with_body("go away")
        );
    }
}
