//! Welfare MCP: Korean national and local welfare service search over the
//! Model Context Protocol.

pub mod api;
pub mod cli;
pub mod mcp;
pub mod tls;
pub mod welfare;
