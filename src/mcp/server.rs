//! MCP server implementation
//!
//! Coordinates the welfare search tool and serves the summary resource.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{
        AnnotateAble, Implementation, ListResourcesResult, PaginatedRequestParams, RawResource,
        ReadResourceRequestParams, ReadResourceResult, Resource, ResourceContents,
        ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool_handler,
};
use serde_json::json;

use crate::welfare::{SearchService, WelfareApi};

/// URI of the last-search summary resource.
pub const SUMMARY_URI: &str = "welfare://summary";
const SUMMARY_NAME: &str = "welfare_summary";

/// Main MCP server coordinator
///
/// Generic over `A: WelfareApi` for zero-cost abstraction (no dynamic dispatch).
/// The summary resource reads the same [`crate::welfare::SummaryStore`] the
/// search service writes.
pub struct McpServer<A: WelfareApi> {
    pub(crate) search: SearchService<A>,
    pub(crate) tool_router: ToolRouter<Self>,
}

impl<A: WelfareApi> Clone for McpServer<A> {
    fn clone(&self) -> Self {
        Self {
            search: self.search.clone(),
            tool_router: self.tool_router.clone(),
        }
    }
}

impl<A: WelfareApi + 'static> McpServer<A> {
    /// Create a new MCP server around a search service
    pub fn new(search: SearchService<A>) -> Self {
        Self {
            search,
            tool_router: Self::welfare_tool_router(),
        }
    }

    /// Resources advertised by `resources/list`
    pub fn resources() -> Vec<Resource> {
        let mut summary = RawResource::new(SUMMARY_URI, SUMMARY_NAME);
        summary.description = Some("Query and result rows of the most recent welfare search".to_string());
        summary.mime_type = Some("application/json".to_string());
        vec![summary.no_annotation()]
    }

    /// Read a resource by URI
    ///
    /// Before the first search the summary is `{"message": "no data yet"}`.
    pub async fn read_summary(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        if uri != SUMMARY_URI {
            return Err(McpError::resource_not_found(
                "resource_not_found",
                Some(json!({ "uri": uri })),
            ));
        }

        let body = self.search.summary().to_json().await;
        let text = serde_json::to_string_pretty(&body).map_err(|e| {
            McpError::internal_error(
                "serialization_error",
                Some(json!({ "error": e.to_string() })),
            )
        })?;

        let mut contents = ResourceContents::text(text, SUMMARY_URI);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
            *mime_type = Some("application/json".to_string());
        }

        Ok(ReadResourceResult::new(vec![contents]))
    }
}

#[tool_handler(router = self.tool_router)]
impl<A: WelfareApi + 'static> ServerHandler for McpServer<A> {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = "welfare-mcp".to_string();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder()
            .enable_tools()
            .enable_resources()
            .build();
        info.server_info = server_info;
        info.instructions = Some(
            "Welfare MCP Server - Search national and local Korean welfare services with \
             search_welfare; read welfare://summary for the last search"
                .to_string(),
        );
        info
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(Self::resources()))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.read_summary(&request.uri).await
    }
}
