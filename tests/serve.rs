//! End-to-end tests of the HTTP dispatch loop.

use serde_json::Value;

mod common;

const MANIFEST: &str = r#"
use = ["log"]

[[handlers]]
name = "log"
action = "pass"

[[handlers]]
name = "auth"
action = "reject"
status = 401
body = "missing token"

[[handlers]]
name = "get_item"
action = "reply"
body = "item"

[[handlers]]
name = "create_item"
action = "reply"
status = 201

[[handlers]]
name = "unfinished"
action = "pass"

[[routes]]
scope = "GET"
path = "/items/{id}"
handlers = ["get_item"]

[[routes]]
scope = "POST"
path = "/items/{id}"
handlers = ["create_item"]

[[routes]]
scope = "GET"
path = "/todo"
handlers = ["unfinished"]

[[groups]]
prefix = "/admin"
use = ["auth"]

[[groups.routes]]
scope = "GET"
path = "/stats"
handlers = ["get_item"]
"#;

#[tokio::test]
async fn test_reply_runs_chain() {
    let server = common::start_server(MANIFEST).await;
    let client = common::client();

    let res = client
        .get(server.url("/items/a%20b"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["route"], "items/{id}");
    assert_eq!(body["params"]["id"], "a b");
    assert_eq!(body["trace"], serde_json::json!(["log", "get_item"]));
    assert_eq!(body["message"], "item");

    let res = client.post(server.url("/items/1")).send().await.unwrap();
    assert_eq!(res.status(), 201);

    server.stop().await;
}

#[tokio::test]
async fn test_reject_stops_chain() {
    let server = common::start_server(MANIFEST).await;

    let res = common::client()
        .get(server.url("/admin/stats"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "rejected by auth: missing token");

    server.stop().await;
}

#[tokio::test]
async fn test_method_not_allowed_lists_scopes() {
    let server = common::start_server(MANIFEST).await;

    let res = common::client()
        .delete(server.url("/items/7"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 405);
    assert_eq!(res.headers()["allow"], "GET, POST");

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = common::start_server(MANIFEST).await;

    let res = common::client()
        .get(server.url("/nowhere"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    server.stop().await;
}

#[tokio::test]
async fn test_exhausted_chain_is_not_implemented() {
    let server = common::start_server(MANIFEST).await;

    let res = common::client()
        .get(server.url("/todo"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 501);

    server.stop().await;
}
