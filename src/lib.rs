//! Skyward Rewards Library
//!
//! This library provides an MCP (Model Context Protocol) server that exposes
//! the Skyward Rewards flight widget: the widget's HTML is resolved from the
//! app's build output and inlined once at startup, and tool calls return the
//! reward flight catalog as structured content.

// Domain modules
pub mod mcp;
pub mod offers;
pub mod widgets;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;
