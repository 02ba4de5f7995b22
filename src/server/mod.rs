//! HTTP surface: MCP-over-HTTP endpoint, health check, auth, CORS

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::ReadwiseHandler;
use crate::mcp::{get_tool_definitions, methods, InitializeResult, McpRequest, McpResponse};

/// Paths served without inbound authentication: liveness and OAuth
/// discovery
const PUBLIC_PATHS: &[&str] = &[
    "/health",
    "/.well-known/oauth-protected-resource",
    "/.well-known/oauth-authorization-server",
    "/register",
];

/// Origins allowed by CORS
const ALLOWED_ORIGINS: &[&str] = &[
    "https://claude.ai",
    "https://claude.com",
    "https://anthropic.com",
];

/// Inbound authentication policy
///
/// Stateless: the decision is a pure function of the configured secret,
/// the request path, and the Authorization header.
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    secret: Option<String>,
}

impl AuthPolicy {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    pub fn enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Decide whether a request may pass
    pub fn check(&self, path: &str, authorization: Option<&str>) -> bool {
        if PUBLIC_PATHS.contains(&path) {
            return true;
        }
        let Some(secret) = &self.secret else {
            return true;
        };
        authorization
            .and_then(|header| header.strip_prefix("Bearer "))
            .is_some_and(|token| token == secret)
    }
}

#[derive(Clone)]
struct AppState {
    handler: Arc<ReadwiseHandler>,
    auth_enabled: bool,
}

/// Build the application router
pub fn router(handler: Arc<ReadwiseHandler>, policy: AuthPolicy) -> Router {
    let state = AppState {
        handler,
        auth_enabled: policy.enabled(),
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/mcp", post(mcp_handler))
        .with_state(state)
        .layer(middleware::from_fn_with_state(
            Arc::new(policy),
            auth_middleware,
        ))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .copied()
        .map(HeaderValue::from_static)
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}

async fn auth_middleware(
    State(policy): State<Arc<AuthPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    if !policy.check(&path, authorization.as_deref()) {
        tracing::warn!("Unauthorized request to {}", path);
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Missing or invalid Authorization header"})),
        )
            .into_response();
    }

    next.run(request).await
}

/// Health check endpoint
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "readwise-mcp",
        "version": env!("CARGO_PKG_VERSION"),
        "authentication": if state.auth_enabled { "enabled" } else { "disabled" },
    }))
}

/// MCP endpoint: one JSON-RPC request per POST body
async fn mcp_handler(State(state): State<AppState>, body: String) -> Response {
    let request: McpRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            return Json(McpResponse::error(
                None,
                -32700,
                format!("Parse error: {}", e),
            ))
            .into_response();
        }
    };

    match dispatch(&state.handler, request).await {
        Some(response) => Json(response).into_response(),
        // Notifications expect no response body
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Route a JSON-RPC request to the MCP method handlers
///
/// Returns `None` for notifications.
pub async fn dispatch(handler: &ReadwiseHandler, request: McpRequest) -> Option<McpResponse> {
    match request.method.as_str() {
        methods::INITIALIZE => Some(McpResponse::success(
            request.id,
            json!(InitializeResult::default()),
        )),
        methods::INITIALIZED => None,
        methods::LIST_TOOLS => Some(McpResponse::success(
            request.id,
            json!({"tools": get_tool_definitions()}),
        )),
        methods::CALL_TOOL => {
            let name = request
                .params
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let arguments = request
                .params
                .get("arguments")
                .cloned()
                .unwrap_or_else(|| json!({}));

            let result = handler.handle_tool_call(&name, arguments).await;
            Some(McpResponse::success(request.id, json!(result)))
        }
        other => Some(McpResponse::error(
            request.id,
            -32601,
            format!("Method not found: {}", other),
        )),
    }
}
