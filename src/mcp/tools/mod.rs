//! MCP tool implementations
//!
//! Tool handlers are `impl McpServer` blocks with their own router,
//! one module per concern.

pub mod search;


use rmcp::ErrorData as McpError;
use serde_json::json;

use crate::welfare::WelfareError;

/// Map a welfare API error to an MCP tool failure.
pub(crate) fn map_welfare_error(err: WelfareError) -> McpError {
    match err {
        WelfareError::MissingServiceKey => McpError::internal_error(
            "configuration_error",
            Some(json!({ "error": err.to_string() })),
        ),
        WelfareError::Upstream { status, ref body } => McpError::internal_error(
            "upstream_error",
            Some(json!({
                "error": err.to_string(),
                "status": status,
                "body": body,
            })),
        ),
        WelfareError::Transport(_) | WelfareError::Xml { .. } => McpError::internal_error(
            "upstream_error",
            Some(json!({ "error": err.to_string() })),
        ),
    }
}
