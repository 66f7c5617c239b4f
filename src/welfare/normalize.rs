//! Normalization of raw XML trees into canonical welfare records.
//!
//! The national and local registries name equivalent concepts differently
//! (`jurMnofNm` vs `bizChrDeptNm` for the agency, and so on). Each registry is
//! described by a [`SourceSchema`]: a table from canonical field to upstream
//! tag(s). The mapping functions are shared and driven by those tables.

use serde_json::Value;

use super::models::{Source, WelfareAttachment, WelfareDetail, WelfareListItem};

/// How one canonical field is read from an upstream node.
#[derive(Debug, Clone, Copy)]
pub enum FieldRule {
    /// The field does not exist for this source/granularity.
    Absent,
    /// First tag whose normalized text is non-null wins.
    FirstOf(&'static [&'static str]),
    /// Normalized texts of all tags, nulls dropped, joined by a space.
    Joined(&'static [&'static str]),
}

impl FieldRule {
    pub fn apply(self, node: &Value) -> Option<String> {
        match self {
            FieldRule::Absent => None,
            FieldRule::FirstOf(tags) => tags.iter().find_map(|tag| normalize_text(node.get(*tag))),
            FieldRule::Joined(tags) => {
                let parts: Vec<String> = tags
                    .iter()
                    .filter_map(|tag| normalize_text(node.get(*tag)))
                    .collect();
                (!parts.is_empty()).then(|| parts.join(" "))
            }
        }
    }
}

/// Canonical field → upstream tag table for one record granularity.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    pub serv_nm: FieldRule,
    pub agency: FieldRule,
    pub jurisdiction: FieldRule,
    pub summary: FieldRule,
    pub support: FieldRule,
    pub conditions: FieldRule,
    pub target: FieldRule,
    pub apply: FieldRule,
    pub cycle: FieldRule,
    pub contact: FieldRule,
    pub detail_url: FieldRule,
}

/// One attachment-bearing node group inside a detail record.
#[derive(Debug, Clone, Copy)]
pub struct AttachmentGroup {
    pub tag: &'static str,
    pub name_tag: &'static str,
    pub url_tag: &'static str,
    /// Keep only entries whose URL looks like an absolute HTTP(S) link.
    pub require_http: bool,
}

/// Everything needed to normalize one registry's responses.
#[derive(Debug, Clone, Copy)]
pub struct SourceSchema {
    pub list: FieldMap,
    pub detail: FieldMap,
    pub attachments: &'static [AttachmentGroup],
}

use FieldRule::{Absent, FirstOf, Joined};

pub const NATIONAL: SourceSchema = SourceSchema {
    list: FieldMap {
        serv_nm: FirstOf(&["servNm"]),
        agency: FirstOf(&["jurMnofNm"]),
        jurisdiction: FirstOf(&["jurOrgNm"]),
        summary: FirstOf(&["servDgst"]),
        support: FirstOf(&["srvPvsnNm"]),
        conditions: Absent,
        target: FirstOf(&["trgterIndvdlArray"]),
        apply: Absent,
        cycle: FirstOf(&["sprtCycNm"]),
        contact: FirstOf(&["rprsCtadr"]),
        detail_url: FirstOf(&["servDtlLink"]),
    },
    detail: FieldMap {
        serv_nm: FirstOf(&["servNm"]),
        agency: FirstOf(&["jurMnofNm"]),
        jurisdiction: FirstOf(&["jurOrgNm"]),
        summary: FirstOf(&["wlfareInfoOutlCn"]),
        support: FirstOf(&["alwServCn", "srvPvsnNm"]),
        conditions: FirstOf(&["slctCritCn"]),
        target: FirstOf(&["trgterIndvdlArray"]),
        apply: FirstOf(&["aplyMtdCn"]),
        cycle: FirstOf(&["sprtCycNm"]),
        contact: FirstOf(&["rprsCtadr"]),
        detail_url: Absent,
    },
    attachments: &[
        AttachmentGroup {
            tag: "basfrmList",
            name_tag: "servSeDetailNm",
            url_tag: "servSeDetailLink",
            require_http: false,
        },
        AttachmentGroup {
            tag: "inqplHmpgReldList",
            name_tag: "servSeDetailNm",
            url_tag: "servSeDetailLink",
            require_http: false,
        },
    ],
};

pub const LOCAL: SourceSchema = SourceSchema {
    list: FieldMap {
        serv_nm: FirstOf(&["servNm"]),
        agency: FirstOf(&["bizChrDeptNm"]),
        jurisdiction: Joined(&["ctpvNm", "sggNm"]),
        summary: FirstOf(&["servDgst"]),
        support: FirstOf(&["srvPvsnNm"]),
        conditions: Absent,
        target: FirstOf(&["trgterIndvdlNmArray"]),
        apply: FirstOf(&["aplyMtdNm"]),
        cycle: FirstOf(&["sprtCycNm"]),
        contact: Absent,
        detail_url: FirstOf(&["servDtlLink"]),
    },
    detail: FieldMap {
        serv_nm: FirstOf(&["servNm"]),
        agency: FirstOf(&["bizChrDeptNm"]),
        jurisdiction: Joined(&["ctpvNm", "sggNm"]),
        summary: FirstOf(&["servDgst"]),
        support: FirstOf(&["alwServCn", "srvPvsnNm"]),
        conditions: FirstOf(&["slctCritCn", "sprtTrgtCn"]),
        target: FirstOf(&["trgterIndvdlNmArray"]),
        apply: FirstOf(&["aplyMtdCn", "aplyMtdNm"]),
        cycle: FirstOf(&["sprtCycNm"]),
        contact: Absent,
        detail_url: Absent,
    },
    attachments: &[
        AttachmentGroup {
            tag: "basfrmList",
            name_tag: "wlfareInfoReldNm",
            url_tag: "wlfareInfoReldCn",
            require_http: false,
        },
        AttachmentGroup {
            tag: "inqplCtadrList",
            name_tag: "wlfareInfoReldNm",
            url_tag: "wlfareInfoReldCn",
            require_http: true,
        },
    ],
};

impl Source {
    pub fn schema(self) -> &'static SourceSchema {
        match self {
            Source::National => &NATIONAL,
            Source::Local => &LOCAL,
        }
    }
}

/// Collapse whitespace runs to one space and trim; empty becomes `None`.
///
/// Numbers and `true` are stringified; an object contributes its `#text`.
/// Anything else (absent, null, `false`, arrays) is `None`.
pub fn normalize_text(value: Option<&Value>) -> Option<String> {
    let raw = match value? {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Object(map) => return normalize_text(map.get("#text")),
        Value::Bool(false) | Value::Null | Value::Array(_) => return None,
    };
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

/// Coerce a field that may be absent, a single node, or a list into a list.
pub fn normalize_array(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Vec::new(),
        Some(Value::String(text)) if text.is_empty() => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

/// Service id: stringified and trimmed, inner whitespace left alone.
fn service_id(node: &Value) -> String {
    match node.get("servId") {
        Some(Value::String(text)) => text.trim().to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Object(map)) => map
            .get("#text")
            .and_then(Value::as_str)
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn map_list_item(fields: &FieldMap, node: &Value) -> WelfareListItem {
    WelfareListItem {
        serv_id: service_id(node),
        serv_nm: fields.serv_nm.apply(node),
        agency: fields.agency.apply(node),
        jurisdiction: fields.jurisdiction.apply(node),
        summary: fields.summary.apply(node),
        support: fields.support.apply(node),
        conditions: fields.conditions.apply(node),
        target: fields.target.apply(node),
        apply: fields.apply.apply(node),
        cycle: fields.cycle.apply(node),
        contact: fields.contact.apply(node),
        detail_url: fields.detail_url.apply(node),
    }
}

fn map_detail(schema: &SourceSchema, node: &Value) -> WelfareDetail {
    let fields = &schema.detail;
    WelfareDetail {
        serv_id: service_id(node),
        serv_nm: fields.serv_nm.apply(node),
        agency: fields.agency.apply(node),
        jurisdiction: fields.jurisdiction.apply(node),
        summary: fields.summary.apply(node),
        support: fields.support.apply(node),
        conditions: fields.conditions.apply(node),
        target: fields.target.apply(node),
        apply: fields.apply.apply(node),
        cycle: fields.cycle.apply(node),
        contact: fields.contact.apply(node),
        attachments: collect_attachments(schema.attachments, node),
    }
}

fn collect_attachments(groups: &[AttachmentGroup], node: &Value) -> Vec<WelfareAttachment> {
    let mut attachments = Vec::new();
    for group in groups {
        for entry in normalize_array(node.get(group.tag)) {
            let name = normalize_text(entry.get(group.name_tag));
            let url = normalize_text(entry.get(group.url_tag));
            let (Some(name), Some(url)) = (name, url) else {
                continue;
            };
            if group.require_http && !url.starts_with("http") {
                continue;
            }
            attachments.push(WelfareAttachment { name, url });
        }
    }
    attachments
}

pub fn map_national_list_item(node: &Value) -> WelfareListItem {
    map_list_item(&NATIONAL.list, node)
}

pub fn map_local_list_item(node: &Value) -> WelfareListItem {
    map_list_item(&LOCAL.list, node)
}

pub fn map_national_detail(node: &Value) -> WelfareDetail {
    map_detail(&NATIONAL, node)
}

pub fn map_local_detail(node: &Value) -> WelfareDetail {
    map_detail(&LOCAL, node)
}

/// Map a list node for `source`.
pub fn map_list_item_for(source: Source, node: &Value) -> WelfareListItem {
    map_list_item(&source.schema().list, node)
}

/// Map a detail node for `source`.
pub fn map_detail_for(source: Source, node: &Value) -> WelfareDetail {
    map_detail(source.schema(), node)
}
