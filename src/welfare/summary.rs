//! Last-search summary exposed as a read-only resource.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;

use super::models::Source;
use super::search::{QueryEcho, SearchResponse};

/// Reduced projection of one search result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryItem {
    pub serv_id: String,
    pub serv_nm: Option<String>,
    pub source: Source,
    pub jurisdiction: Option<String>,
    pub agency: Option<String>,
    pub support: Option<String>,
    pub conditions: Option<String>,
    pub target: Option<String>,
    pub cycle: Option<String>,
}

/// The most recent search, without attachments or long-form text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResource {
    /// RFC 3339 UTC timestamp, millisecond precision
    pub generated_at: String,
    pub query: QueryEcho,
    pub items: Vec<SummaryItem>,
}

impl SummaryResource {
    pub fn from_response(response: &SearchResponse, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            query: response.query.clone(),
            items: response
                .items
                .iter()
                .map(|row| SummaryItem {
                    serv_id: row.serv_id.clone(),
                    serv_nm: row.serv_nm.clone(),
                    source: row.source,
                    jurisdiction: row.jurisdiction.clone(),
                    agency: row.agency.clone(),
                    support: row.support.clone(),
                    conditions: row.conditions.clone(),
                    target: row.target.clone(),
                    cycle: row.cycle.clone(),
                })
                .collect(),
        }
    }
}

/// Single-slot store for the latest [`SummaryResource`].
///
/// Every completed search overwrites the slot (last writer wins). Clones
/// share the same slot, so the orchestrator and the resource handler can
/// each hold one.
#[derive(Clone, Default)]
pub struct SummaryStore {
    slot: Arc<RwLock<Option<SummaryResource>>>,
}

impl SummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn replace(&self, summary: SummaryResource) {
        *self.slot.write().await = Some(summary);
    }

    pub async fn latest(&self) -> Option<SummaryResource> {
        self.slot.read().await.clone()
    }

    /// JSON body for the summary resource; a placeholder before the first search.
    pub async fn to_json(&self) -> serde_json::Value {
        match self.latest().await {
            Some(summary) => serde_json::to_value(summary)
                .unwrap_or_else(|e| json!({ "error": e.to_string() })),
            None => json!({ "message": "no data yet" }),
        }
    }
}
