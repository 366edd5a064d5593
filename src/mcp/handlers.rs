//! MCP (Model Context Protocol) route handlers
//!
//! JSON-RPC over HTTP: decodes the envelope, hands the call to the
//! [`McpDispatcher`](super::dispatcher::McpDispatcher) and wraps its result.

use super::{helpers::*, models::*};
use crate::state::{AppState, SharedState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

/// JSON-RPC error codes
const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_mcp).get(handle_mcp_sse))
        .route("/mcp", post(handle_mcp).get(handle_mcp_sse)) // Standard endpoint
        .route("/mcp/", post(handle_mcp).get(handle_mcp_sse)) // Trailing slash safety
}

/// Handle SSE (Server-Sent Events) handshake for GET requests
async fn handle_mcp_sse() -> impl IntoResponse {
    (
        [("content-type", "text/event-stream")],
        "event: endpoint\ndata: /mcp\n\n",
    )
}

/// Endpoint: POST /mcp
/// Handles the Model Context Protocol communication for POST requests.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            tracing::warn!(error = %e.body_text(), "rejected JSON-RPC body");
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, PARSE_ERROR, "Parse error")),
            )
                .into_response();
        }
    };

    let id = req.id.unwrap_or(Value::Null);
    let params = req.params.unwrap_or(Value::Null);
    tracing::info!(method = %req.method, id = %id, "MCP call");

    Json(handle_request(&state, &req.method, id, &params)).into_response()
}

/// Dispatches one decoded JSON-RPC request and returns its envelope.
pub fn handle_request(state: &AppState, method: &str, id: Value, params: &Value) -> Value {
    let dispatcher = state.dispatcher();

    match method {
        "initialize" => rpc_success(id, handle_initialize()),
        "notifications/initialized" => rpc_success(id, json!({})),
        "ping" => rpc_success(id, json!({})),
        "tools/list" => respond(id, &dispatcher.list_tools()),
        "resources/list" => respond(id, &dispatcher.list_resources()),
        "resources/templates/list" => respond(id, &dispatcher.list_resource_templates()),
        "resources/read" => match params.get("uri").and_then(Value::as_str) {
            Some(uri) => respond(id, &dispatcher.read_resource(uri)),
            None => rpc_error(id, INVALID_PARAMS, "Missing resource uri"),
        },
        "tools/call" => match params.get("name").and_then(Value::as_str) {
            Some(name) => {
                let arguments = params.get("arguments").cloned();
                respond(id, &dispatcher.call_tool(name, arguments))
            }
            None => rpc_error(id, INVALID_PARAMS, "Missing tool name"),
        },
        _ => {
            tracing::warn!(method, "unknown method");
            rpc_error(id, METHOD_NOT_FOUND, "Method not found")
        }
    }
}

/// Handles `initialize` request (Handshake).
fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "listChanged": false, "subscribe": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        }
    })
}

/// Wraps a dispatcher result in a success envelope.
fn respond<T: Serialize>(id: Value, result: &T) -> Value {
    match serde_json::to_value(result) {
        Ok(result) => rpc_success(id, result),
        Err(err) => {
            tracing::error!(error = %err, "failed to encode result");
            rpc_error(id, INTERNAL_ERROR, "Internal error")
        }
    }
}
