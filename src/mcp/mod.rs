//! MCP surface of the welfare search.
//!
//! One tool, `search_welfare`, and one read-only resource, `welfare://summary`,
//! which holds a projection of the last successful search. [`McpServer`] is
//! generic over `A: WelfareApi` so tests can swap the upstream client for an
//! in-memory stub; [`create_mcp_service`] wraps it for mounting in axum.

pub mod server;
mod service;
pub mod tools;


pub use server::{McpServer, SUMMARY_URI};
pub use service::create_mcp_service;
