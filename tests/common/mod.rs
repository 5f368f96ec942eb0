//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::net::TcpListener;
use tokio::sync::oneshot;

use trie_router::chain::{FnHandler, Identify};
use trie_router::config::{build_routes, parse_manifest};
use trie_router::http::serve;
use trie_router::routing::Routes;

/// Value-only handler over a call log: each stage appends its name.
pub type Step = FnHandler<Vec<String>, Vec<String>>;

/// A stage that records itself and continues.
pub fn pass(name: &'static str) -> Step {
    FnHandler::new(name, move |next, mut log: Vec<String>| {
        log.push(name.to_string());
        next.run(log)
    })
}

/// A stage that records itself and ends the chain.
pub fn stop(name: &'static str) -> Step {
    FnHandler::new(name, move |_, mut log: Vec<String>| {
        log.push(name.to_string());
        log
    })
}

/// Display names of an endpoint's chain, in order.
pub fn chain_names<H: Identify>(routes: &Routes<H>, scope: &str, path: &str) -> Vec<String> {
    let (endpoint, _) = routes.match_route(scope, path);
    endpoint
        .map(|e| e.handlers().iter().map(Identify::display_name).collect())
        .unwrap_or_default()
}

/// A handler that counts its invocations in a shared log.
pub fn counting(name: &'static str, calls: Arc<Mutex<Vec<&'static str>>>) -> Step {
    FnHandler::new(name, move |next, log: Vec<String>| {
        if let Ok(mut calls) = calls.lock() {
            calls.push(name);
        }
        if next.is_exhausted() {
            log
        } else {
            next.run(log)
        }
    })
}

/// A running test server on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

/// Compile `manifest` and serve it on 127.0.0.1 with an OS-assigned port.
pub async fn start_server(manifest: &str) -> TestServer {
    let manifest = parse_manifest(manifest).unwrap();
    let routes = build_routes(&manifest).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let _ = serve(listener, routes, async move {
            let _ = rx.await;
        })
        .await;
    });

    TestServer {
        addr,
        shutdown: Some(tx),
        handle,
    }
}

/// A client that never pools or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
