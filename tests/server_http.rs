//! HTTP surface: auth middleware, health check, and JSON-RPC dispatch,
//! exercised in-process with tower's oneshot.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use readwise_mcp::client::{ClientConfig, ReadwiseClient};
use readwise_mcp::handler::ReadwiseHandler;
use readwise_mcp::server::{router, AuthPolicy};

/// Router with no remote behind it; dispatch-level tests never reach the
/// Readwise API.
fn app(secret: Option<&str>) -> axum::Router {
    let client = ReadwiseClient::new(ClientConfig::new("unused-token")).expect("client");
    let handler = Arc::new(ReadwiseHandler::new(client));
    router(handler, AuthPolicy::new(secret.map(String::from)))
}

fn rpc_request(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_is_open_even_with_auth_enabled() {
    let response = app(Some("s3cret"))
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "readwise-mcp");
    assert_eq!(body["authentication"], "enabled");
}

#[tokio::test]
async fn health_reports_auth_disabled() {
    let response = app(None)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["authentication"], "disabled");
}

#[tokio::test]
async fn mcp_rejects_missing_token() {
    let request = rpc_request(
        "/mcp",
        None,
        json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
    );
    let response = app(Some("s3cret")).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Authorization"));
}

#[tokio::test]
async fn mcp_rejects_wrong_token() {
    let request = rpc_request(
        "/mcp",
        Some("wrong"),
        json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
    );
    let response = app(Some("s3cret")).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tools_list_returns_all_thirteen() {
    let request = rpc_request(
        "/mcp",
        Some("s3cret"),
        json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
    );
    let response = app(Some("s3cret")).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let tools = body["result"]["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 13);
    assert!(tools
        .iter()
        .any(|t| t["name"] == "readwise_export_highlights"));
}

#[tokio::test]
async fn auth_disabled_allows_unauthenticated_calls() {
    let request = rpc_request(
        "/mcp",
        None,
        json!({"jsonrpc": "2.0", "id": 7, "method": "tools/list"}),
    );
    let response = app(None).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], 7);
}

#[tokio::test]
async fn initialize_reports_server_info() {
    let request = rpc_request(
        "/mcp",
        None,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
    );
    let response = app(None).oneshot(request).await.unwrap();

    let body = body_json(response).await;
    assert_eq!(body["result"]["serverInfo"]["name"], "readwise-mcp");
    assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
    assert!(body["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn notifications_get_accepted_without_body() {
    let request = rpc_request(
        "/mcp",
        None,
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    );
    let response = app(None).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn parse_error_returns_rpc_error() {
    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app(None).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], -32700);
}

#[tokio::test]
async fn unknown_method_returns_method_not_found() {
    let request = rpc_request(
        "/mcp",
        None,
        json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"}),
    );
    let response = app(None).oneshot(request).await.unwrap();

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], -32601);
    assert_eq!(body["id"], 3);
}

#[tokio::test]
async fn tool_call_with_unknown_tool_reports_in_result() {
    let request = rpc_request(
        "/mcp",
        None,
        json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "readwise_nope", "arguments": {}},
        }),
    );
    let response = app(None).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // tool failures ride inside the result payload, not the rpc error
    assert!(body.get("error").is_none());
    assert_eq!(body["result"]["isError"], true);
    let text = body["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("unknown tool"));
}
