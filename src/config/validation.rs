//! Manifest validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routes reference declared handlers)
//! - Validate value ranges (status codes, bind address, log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Route conflicts are left to the router itself, at compile time
//! - Validation is a pure function: &Manifest → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::StatusCode;
use thiserror::Error;

use crate::config::schema::{HandlerAction, HandlerConfig, Manifest, RouteTable};

/// One semantic problem in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("handler {0:?} is declared more than once")]
    DuplicateHandler(String),

    #[error("{context}: unknown handler {handler:?}")]
    UnknownHandler { context: String, handler: String },

    #[error("{context}: path is empty")]
    EmptyPath { context: String },

    #[error("{context}: no handlers")]
    NoHandlers { context: String },

    #[error("group prefix \"/\" is not allowed")]
    RootGroup,

    #[error("handler {handler:?}: invalid status {status}")]
    InvalidStatus { handler: String, status: u16 },

    #[error("invalid bind address {0:?}")]
    InvalidBindAddress(String),

    #[error("invalid log level {0:?}")]
    InvalidLogLevel(String),
}

/// Check a parsed manifest, collecting every error found.
pub fn validate_manifest(manifest: &Manifest) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if manifest.logging.level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            manifest.logging.level.clone(),
        ));
    }
    if manifest.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            manifest.server.bind_address.clone(),
        ));
    }

    let mut declared = HashSet::new();
    for handler in &manifest.handlers {
        if !declared.insert(handler.name.as_str()) {
            errors.push(ValidationError::DuplicateHandler(handler.name.clone()));
        }
        if let Err(e) = effective_status(handler) {
            errors.push(e);
        }
    }

    check_table(&manifest.root, "", &declared, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Status a stage answers with, after defaults.
pub fn effective_status(handler: &HandlerConfig) -> Result<StatusCode, ValidationError> {
    let default = match handler.action {
        HandlerAction::Reject => StatusCode::FORBIDDEN,
        HandlerAction::Pass | HandlerAction::Reply => StatusCode::OK,
    };
    let Some(status) = handler.status else {
        return Ok(default);
    };

    let invalid = || ValidationError::InvalidStatus {
        handler: handler.name.clone(),
        status,
    };
    let code = StatusCode::from_u16(status).map_err(|_| invalid())?;
    let fits = match handler.action {
        HandlerAction::Reject => code.is_client_error() || code.is_server_error(),
        HandlerAction::Pass | HandlerAction::Reply => !code.is_informational(),
    };
    if fits {
        Ok(code)
    } else {
        Err(invalid())
    }
}

fn check_table(
    table: &RouteTable,
    prefix: &str,
    declared: &HashSet<&str>,
    errors: &mut Vec<ValidationError>,
) {
    let context = if prefix.is_empty() { "root" } else { prefix };
    check_names(&table.pre_handlers, &format!("{context} use"), declared, errors);
    check_names(&table.global, &format!("{context} global"), declared, errors);

    for route in &table.routes {
        let label = if prefix.is_empty() {
            route.label()
        } else {
            format!("{prefix} {}", route.label())
        };
        if route.path.is_empty() {
            errors.push(ValidationError::EmptyPath {
                context: label.clone(),
            });
        }
        if route.handlers.is_empty() {
            errors.push(ValidationError::NoHandlers {
                context: label.clone(),
            });
        }
        check_names(&route.handlers, &label, declared, errors);
    }

    for group in &table.groups {
        if group.prefix == "/" {
            errors.push(ValidationError::RootGroup);
        }
        let nested = format!("{prefix}[{}]", group.prefix);
        check_table(&group.table, &nested, declared, errors);
    }
}

fn check_names(
    names: &[String],
    context: &str,
    declared: &HashSet<&str>,
    errors: &mut Vec<ValidationError>,
) {
    for name in names {
        if !declared.contains(name.as_str()) {
            errors.push(ValidationError::UnknownHandler {
                context: context.to_string(),
                handler: name.clone(),
            });
        }
    }
}
