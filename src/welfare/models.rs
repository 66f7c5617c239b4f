//! Canonical welfare records shared by both upstream registries.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

/// Upstream program registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Central-government programs
    National,
    /// Local-government programs
    Local,
}

impl Source {
    /// Both registries, in the order results are reported.
    pub const ALL: [Source; 2] = [Source::National, Source::Local];

    pub fn as_str(self) -> &'static str {
        match self {
            Source::National => "national",
            Source::Local => "local",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary-level record returned by a list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelfareListItem {
    pub serv_id: String,
    pub serv_nm: Option<String>,
    pub agency: Option<String>,
    pub jurisdiction: Option<String>,
    pub summary: Option<String>,
    pub support: Option<String>,
    pub conditions: Option<String>,
    pub target: Option<String>,
    pub apply: Option<String>,
    pub cycle: Option<String>,
    pub contact: Option<String>,
    pub detail_url: Option<String>,
}

/// Downloadable form or related link attached to a detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WelfareAttachment {
    pub name: String,
    pub url: String,
}

/// Full-fidelity record for one service id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelfareDetail {
    pub serv_id: String,
    pub serv_nm: Option<String>,
    pub agency: Option<String>,
    pub jurisdiction: Option<String>,
    pub summary: Option<String>,
    pub support: Option<String>,
    pub conditions: Option<String>,
    pub target: Option<String>,
    pub apply: Option<String>,
    pub cycle: Option<String>,
    pub contact: Option<String>,
    pub attachments: Vec<WelfareAttachment>,
}

/// A list item tagged with the registry it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub source: Source,
    pub item: WelfareListItem,
}

/// A list item overlaid with its detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRow {
    pub serv_id: String,
    pub serv_nm: Option<String>,
    pub source: Source,
    pub agency: Option<String>,
    pub jurisdiction: Option<String>,
    pub summary: Option<String>,
    pub support: Option<String>,
    pub conditions: Option<String>,
    pub target: Option<String>,
    pub apply: Option<String>,
    pub cycle: Option<String>,
    pub contact: Option<String>,
    pub detail_url: Option<String>,
    pub attachments: Vec<WelfareAttachment>,
}

impl EnrichedRow {
    /// Overlay `detail` onto `row`.
    ///
    /// A detail field wins only when it is present; otherwise the list value is kept.
    /// `servId`, `source` and `detailUrl` always come from the list row.
    pub fn merge(row: ListRow, detail: Option<WelfareDetail>) -> Self {
        let ListRow { source, item } = row;
        let Some(detail) = detail else {
            return Self {
                serv_id: item.serv_id,
                serv_nm: item.serv_nm,
                source,
                agency: item.agency,
                jurisdiction: item.jurisdiction,
                summary: item.summary,
                support: item.support,
                conditions: item.conditions,
                target: item.target,
                apply: item.apply,
                cycle: item.cycle,
                contact: item.contact,
                detail_url: item.detail_url,
                attachments: Vec::new(),
            };
        };

        Self {
            serv_id: item.serv_id,
            serv_nm: pick(detail.serv_nm, item.serv_nm),
            source,
            agency: pick(detail.agency, item.agency),
            jurisdiction: pick(detail.jurisdiction, item.jurisdiction),
            summary: pick(detail.summary, item.summary),
            support: pick(detail.support, item.support),
            conditions: pick(detail.conditions, item.conditions),
            target: pick(detail.target, item.target),
            apply: pick(detail.apply, item.apply),
            cycle: pick(detail.cycle, item.cycle),
            contact: pick(detail.contact, item.contact),
            detail_url: item.detail_url,
            attachments: detail.attachments,
        }
    }
}

fn pick(detail: Option<String>, list: Option<String>) -> Option<String> {
    detail.filter(|value| !value.is_empty()).or(list)
}
