//! Welfare search tool
//!
//! `search_welfare` fans out to the national and/or local registries,
//! enriches the first rows with their detail records, and returns the
//! result as structured content with a one-line text summary.

use rmcp::{
    ErrorData as McpError,
    handler::server::{tool::schema_for_type, wrapper::Parameters},
    model::{CallToolResult, Content},
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use crate::mcp::server::McpServer;
use crate::mcp::tools::map_welfare_error;
use crate::welfare::search::MAX_RESULTS_LIMIT;
use crate::welfare::{SearchRequest, SearchResponse, Source, WelfareApi};

/// Upper bound on rows requested per list page.
pub const MAX_NUM_OF_ROWS: u32 = 50;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchWelfareParams {
    #[schemars(description = "Age of the person looking for support, in years (optional)")]
    pub age: Option<u32>,
    #[schemars(
        description = "검색어는 핵심 키워드만 입력 (예: 신혼부부, 청년, 주거)",
        length(min = 1)
    )]
    pub search_wrd: String,
    #[schemars(description = "Province name for local programs, e.g. 서울특별시 (optional)")]
    pub ctpv_nm: Option<String>,
    #[schemars(description = "District name for local programs, e.g. 송파구 (optional)")]
    pub sgg_nm: Option<String>,
    #[schemars(description = "Registries to search: national, local. Default: both")]
    pub sources: Option<Vec<Source>>,
    #[schemars(description = "Upstream page number (default: 1)", range(min = 1))]
    pub page_no: Option<u32>,
    #[schemars(description = "Rows per upstream page (default: 10, max: 50)", range(min = 1, max = 50))]
    pub num_of_rows: Option<u32>,
    #[schemars(
        description = "Number of results to enrich with details (default: 6, max: 20). Keep small to prevent context overflow.",
        range(min = 1, max = 20)
    )]
    pub max_results: Option<u32>,
}

impl SearchWelfareParams {
    /// Check bounds and convert into a search request.
    pub fn into_request(self) -> Result<SearchRequest, McpError> {
        if self.search_wrd.is_empty() {
            return Err(invalid("searchWrd must not be empty", json!(self.search_wrd)));
        }
        if self.page_no == Some(0) {
            return Err(invalid("pageNo must be at least 1", json!(self.page_no)));
        }
        if let Some(rows) = self
            .num_of_rows
            .filter(|rows| !(1..=MAX_NUM_OF_ROWS).contains(rows))
        {
            return Err(invalid("numOfRows must be between 1 and 50", json!(rows)));
        }
        if let Some(max) = self
            .max_results
            .filter(|max| !(1..=MAX_RESULTS_LIMIT).contains(max))
        {
            return Err(invalid("maxResults must be between 1 and 20", json!(max)));
        }

        Ok(SearchRequest {
            age: self.age,
            search_wrd: self.search_wrd,
            ctpv_nm: self.ctpv_nm,
            sgg_nm: self.sgg_nm,
            sources: self.sources,
            page_no: self.page_no,
            num_of_rows: self.num_of_rows,
            max_results: self.max_results,
        })
    }
}

fn invalid(message: &'static str, value: serde_json::Value) -> McpError {
    McpError::invalid_params(message, Some(json!({ "value": value })))
}

#[tool_router(router = welfare_tool_router, vis = "pub(crate)")]
impl<A: WelfareApi + 'static> McpServer<A> {
    /// Search welfare services and enrich the top results with details
    #[tool(
        description = "Search Korean welfare services (national and local government programs) by keyword. Returns up to maxResults programs enriched with eligibility, support, application method and attachments. Default maxResults: 6, max: 20.",
        output_schema = schema_for_type::<SearchResponse>()
    )]
    #[instrument(skip(self, params))]
    pub async fn search_welfare(
        &self,
        params: Parameters<SearchWelfareParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(input = ?params.0, "search_welfare");
        let request = params.0.into_request()?;

        let response = self
            .search
            .search(request)
            .await
            .map_err(map_welfare_error)?;

        tool_result(&response)
    }
}

/// Text line shown next to the structured payload.
fn summary_line(response: &SearchResponse) -> String {
    format!(
        "Found {} policies (from {} matches).",
        response.items.len(),
        response.total_count
    )
}

fn tool_result(response: &SearchResponse) -> Result<CallToolResult, McpError> {
    let payload = serde_json::to_value(response).map_err(|e| {
        McpError::internal_error(
            "serialization_error",
            Some(json!({ "error": e.to_string() })),
        )
    })?;

    let mut result = CallToolResult::structured(payload);
    result.content = vec![Content::text(summary_line(response))];
    Ok(result)
}
