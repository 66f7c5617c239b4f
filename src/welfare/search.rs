//! Search-and-merge orchestration.
//!
//! Fans a query out to the selected registries' list endpoints, keeps the
//! first `maxResults` rows (national before local, upstream order within
//! each), enriches each with its detail record, and records a summary.

use std::sync::Arc;

use chrono::Utc;
use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::client::{ListQuery, WelfareApi};
use super::error::WelfareResult;
use super::models::{EnrichedRow, ListRow, Source};
use super::summary::{SummaryResource, SummaryStore};

/// Rows enriched when the caller does not say otherwise.
pub const DEFAULT_MAX_RESULTS: u32 = 6;
/// Upper bound on rows enriched per search.
pub const MAX_RESULTS_LIMIT: u32 = 20;

/// One search invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub age: Option<u32>,
    pub search_wrd: String,
    pub ctpv_nm: Option<String>,
    pub sgg_nm: Option<String>,
    pub sources: Option<Vec<Source>>,
    pub page_no: Option<u32>,
    pub num_of_rows: Option<u32>,
    pub max_results: Option<u32>,
}

/// Echo of the effective query inputs; omitted optionals are `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryEcho {
    pub age: Option<u32>,
    pub search_wrd: Option<String>,
    pub ctpv_nm: Option<String>,
    pub sgg_nm: Option<String>,
    pub sources: Vec<Source>,
}

/// Search result payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: QueryEcho,
    /// Rows fetched across sources before truncation
    pub total_count: usize,
    pub items: Vec<EnrichedRow>,
}

/// Explicit non-empty `sources`, else both; always in national → local order.
pub fn resolve_sources(requested: Option<&[Source]>) -> Vec<Source> {
    match requested {
        Some(sources) if !sources.is_empty() => Source::ALL
            .into_iter()
            .filter(|source| sources.contains(source))
            .collect(),
        _ => Source::ALL.to_vec(),
    }
}

/// Runs searches against a [`WelfareApi`] and records each result in a [`SummaryStore`].
pub struct SearchService<A: WelfareApi> {
    api: Arc<A>,
    summary: SummaryStore,
}

impl<A: WelfareApi> Clone for SearchService<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            summary: self.summary.clone(),
        }
    }
}

impl<A: WelfareApi> SearchService<A> {
    pub fn new(api: Arc<A>, summary: SummaryStore) -> Self {
        Self { api, summary }
    }

    pub fn summary(&self) -> &SummaryStore {
        &self.summary
    }

    /// Run one search.
    ///
    /// Any list or detail failure aborts the whole search; a detail lookup
    /// that finds nothing keeps the list row as-is with no attachments.
    pub async fn search(&self, request: SearchRequest) -> WelfareResult<SearchResponse> {
        let sources = resolve_sources(request.sources.as_deref());
        let query = ListQuery {
            page_no: request.page_no.unwrap_or(1),
            num_of_rows: request.num_of_rows.unwrap_or(10),
            age: request.age,
            search_wrd: Some(request.search_wrd.clone()),
            ctpv_nm: request.ctpv_nm.clone(),
            sgg_nm: request.sgg_nm.clone(),
        };

        let mut rows: Vec<ListRow> = Vec::new();
        for &source in &sources {
            let items = match source {
                Source::National => self.api.fetch_national_list(&query).await?,
                Source::Local => self.api.fetch_local_list(&query).await?,
            };
            rows.extend(items.into_iter().map(|item| ListRow { source, item }));
        }

        let total_count = rows.len();
        let max_results = request.max_results.unwrap_or(DEFAULT_MAX_RESULTS) as usize;
        rows.truncate(max_results.min(total_count));

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let detail = match row.source {
                Source::National => self.api.fetch_national_detail(&row.item.serv_id).await?,
                Source::Local => self.api.fetch_local_detail(&row.item.serv_id).await?,
            };
            items.push(EnrichedRow::merge(row, detail));
        }

        let response = SearchResponse {
            query: QueryEcho {
                age: request.age,
                search_wrd: Some(request.search_wrd),
                ctpv_nm: request.ctpv_nm,
                sgg_nm: request.sgg_nm,
                sources,
            },
            total_count,
            items,
        };

        self.summary
            .replace(SummaryResource::from_response(&response, Utc::now()))
            .await;

        info!(
            total_count = response.total_count,
            returned = response.items.len(),
            sources = ?response.query.sources,
            serv_ids = ?response.items.iter().map(|row| row.serv_id.as_str()).collect::<Vec<_>>(),
            "welfare search complete"
        );
        debug!(
            "Found {} policies (from {} matches).",
            response.items.len(),
            response.total_count
        );

        Ok(response)
    }
}
