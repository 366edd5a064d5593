//! MCP Protocol Helpers
//!
//! This module contains helper functions for JSON-RPC communication
//! and OpenAI widget metadata construction.

use super::models::{TextResourceContents, WIDGET_MIME_TYPE};
use crate::widgets::WidgetDescriptor;
use serde_json::{json, Value};

/// Constructs the metadata required by the OpenAI widget system.
///
/// - `openai/outputTemplate` – URI of the widget HTML.
/// - `openai/toolInvocation/invoking` / `invoked` – status copy for the
///   tool lifecycle.
/// - `openai/widgetAccessible` – the widget may call tools itself.
/// - `openai/resultCanProduceWidget` – results render through the widget.
pub fn widget_meta(widget: &WidgetDescriptor) -> Value {
    json!({
        "openai/outputTemplate": widget.template_uri,
        "openai/toolInvocation/invoking": widget.invoking,
        "openai/toolInvocation/invoked": widget.invoked,
        "openai/widgetAccessible": true,
        "openai/resultCanProduceWidget": true,
    })
}

/// Widget metadata plus the rendered document as an embedded resource,
/// attached to successful tool calls.
pub fn widget_result_meta(widget: &WidgetDescriptor) -> Value {
    let resource = TextResourceContents {
        uri: widget.template_uri.clone(),
        mime_type: WIDGET_MIME_TYPE.to_string(),
        text: widget.html.clone(),
        title: Some(widget.title.clone()),
        meta: None,
    };

    let mut meta = widget_meta(widget);
    meta["openai.com/widget"] = json!({
        "type": "resource",
        "resource": resource,
    });
    meta
}

/// Input schema shared by widget tools: an optional `fareCabin` string and
/// nothing else.
pub fn tool_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "fareCabin": {
                "type": "string",
                "description": "Optional cabin to filter the flight offers."
            }
        },
        "required": [],
        "additionalProperties": false
    })
}

/// Builds a JSON-RPC 2.0 success response.
///
/// # Arguments
///
/// * `id` – The request identifier that must be echoed back.
/// * `result` – The payload representing the successful outcome.
pub fn rpc_success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` – The request identifier (or `null` if unavailable).
/// * `code` – The JSON-RPC error code (e.g., -32601 for method not found).
/// * `message` – Human-readable description of the error.
pub fn rpc_error(id: Value, code: i32, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message.into(),
        }
    })
}
