//! Model Context Protocol (MCP) Module
//!
//! This module contains all MCP protocol implementation, including:
//! - Protocol models (JsonRpcRequest, tool/resource shapes, constants)
//! - RPC helpers (success/error responses, widget metadata)
//! - The dispatcher mapping requests onto widgets and offers
//! - HTTP handlers (initialize, tools/list, tools/call, etc.)

pub mod dispatcher;
pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types and functions
pub use dispatcher::McpDispatcher;
pub use handlers::routes;
