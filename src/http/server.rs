//! HTTP server setup and the dispatch loop.
//!
//! # Responsibilities
//! - Create the Axum Router with a single fallback handler
//! - Match (method, path) against the route forest
//! - Drive the matched endpoint's handler chain
//! - Map no-match and chain failures onto status codes
//! - Bind server to listener with graceful shutdown

use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::http::stage::{Exchange, Stage};
use crate::routing::Routes;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<Routes<Stage>>,
}

/// Build the Axum router serving `routes`.
pub fn app(routes: Arc<Routes<Stage>>) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(AppState { routes })
        .layer(TraceLayer::new_for_http())
}

/// Serve `routes` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, routes: Routes<Stage>, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(
        address = %addr,
        routes = routes.len(),
        "HTTP server starting"
    );

    axum::serve(listener, app(Arc::new(routes)))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("Shutdown signal received");
}

/// Resolve the request against the forest and run the endpoint's chain.
async fn dispatch(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let path = uri.path();
    let (endpoint, params) = state.routes.match_route(method.as_str(), path);

    let Some(endpoint) = endpoint else {
        return no_match(&state.routes, &method, path);
    };

    tracing::debug!(
        method = %method,
        path = %path,
        route = %endpoint.path(),
        handlers = %endpoint.handler_path(),
        "Dispatching request"
    );

    let exchange = Exchange::new(method.as_str(), path, endpoint.path(), params);
    match endpoint.chain().try_run(exchange) {
        Ok(reply) => reply.into_response(),
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Handler chain failed");
            e.into_response()
        }
    }
}

/// 405 with `Allow` when the path exists under another scope, else 404.
fn no_match(routes: &Routes<Stage>, method: &Method, path: &str) -> Response {
    let allowed = routes.match_scopes(path);
    if allowed.is_empty() {
        tracing::debug!(method = %method, path = %path, "No route matched");
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "no matching route" })),
        )
            .into_response();
    }

    let allow = allowed.join(", ");
    tracing::debug!(method = %method, path = %path, allow = %allow, "Method not allowed");
    let mut response = (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "method not allowed", "allow": allowed })),
    )
        .into_response();
    if let Ok(value) = HeaderValue::from_str(&allow) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}
