//! Streamable HTTP transport for the welfare MCP server.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::welfare::{SearchService, WelfareApi};

use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// Every session gets its own [`McpServer`], but all of them share the
/// search service and therefore the summary store.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// use welfare_mcp::mcp::create_mcp_service;
/// use welfare_mcp::welfare::{ClientConfig, SearchService, SummaryStore, WelfareClient};
///
/// let client = Arc::new(WelfareClient::new(ClientConfig::from_env()));
/// let search = SearchService::new(client, SummaryStore::new());
/// let mcp_service = create_mcp_service(search, CancellationToken::new());
///
/// let app: Router = Router::new().nest_service("/govcare/mcp", mcp_service);
/// ```
pub fn create_mcp_service<A: WelfareApi + 'static>(
    search: SearchService<A>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<A>, LocalSessionManager> {
    let sessions = Arc::new(LocalSessionManager::default());
    let mut config = StreamableHttpServerConfig::default();
    config.stateful_mode = true;
    config.cancellation_token = cancellation_token;

    StreamableHttpService::new(
        move || Ok::<_, std::io::Error>(McpServer::new(search.clone())),
        sessions,
        config,
    )
}
