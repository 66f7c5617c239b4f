use tabled::builder::Builder;
use tabled::{Table, Tabled};

use crate::cli::commands::OutputFormat;
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, or_dash, source_heading, truncate_with_ellipsis};
use crate::welfare::{EnrichedRow, SearchRequest, SearchResponse, SearchService, Source, WelfareApi};

#[derive(Tabled)]
pub(crate) struct WelfareRowDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: String,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(rename = "Agency")]
    pub(crate) agency: String,
    #[tabled(rename = "Target")]
    pub(crate) target: String,
    #[tabled(rename = "Support")]
    pub(crate) support: String,
}

impl From<&EnrichedRow> for WelfareRowDisplay {
    fn from(row: &EnrichedRow) -> Self {
        let agency = row.agency.as_deref().or(row.jurisdiction.as_deref());
        Self {
            id: row.serv_id.clone(),
            name: truncate_with_ellipsis(&or_dash(row.serv_nm.as_deref()), 30),
            agency: truncate_with_ellipsis(&or_dash(agency), 20),
            target: truncate_with_ellipsis(&or_dash(row.target.as_deref()), 20),
            support: truncate_with_ellipsis(&or_dash(row.support.as_deref()), 40),
        }
    }
}

/// Run a search and render the result
pub async fn search<A: WelfareApi>(
    service: &SearchService<A>,
    request: SearchRequest,
    format: OutputFormat,
) -> CliResult<String> {
    let response = service.search(request).await?;
    render(&response, format)
}

pub(crate) fn render(response: &SearchResponse, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Table => Ok(format_table(response)),
        OutputFormat::Cards => Ok(format_cards(response)),
    }
}

/// Rows of one registry, in response order
fn rows_for(response: &SearchResponse, source: Source) -> Vec<&EnrichedRow> {
    response
        .items
        .iter()
        .filter(|row| row.source == source)
        .collect()
}

fn footer(response: &SearchResponse) -> String {
    format!(
        "Found {} policies (from {} matches).",
        response.items.len(),
        response.total_count
    )
}

pub(crate) fn format_table(response: &SearchResponse) -> String {
    if response.items.is_empty() {
        return "No welfare programs found.".to_string();
    }

    let mut sections = Vec::new();
    for source in Source::ALL {
        let rows = rows_for(response, source);
        if rows.is_empty() {
            continue;
        }

        let display: Vec<WelfareRowDisplay> = rows.into_iter().map(Into::into).collect();
        let mut table = Table::new(display);
        apply_table_style(&mut table);
        sections.push(format!("{}\n{}", source_heading(source), table));
    }
    sections.push(footer(response));
    sections.join("\n\n")
}

pub(crate) fn format_cards(response: &SearchResponse) -> String {
    if response.items.is_empty() {
        return "No welfare programs found.".to_string();
    }

    let mut sections = Vec::new();
    for source in Source::ALL {
        let rows = rows_for(response, source);
        if rows.is_empty() {
            continue;
        }

        sections.push(format!("== {} ({}) ==", source_heading(source), rows.len()));
        sections.extend(rows.into_iter().map(format_card));
    }
    sections.push(footer(response));
    sections.join("\n\n")
}

fn format_card(row: &EnrichedRow) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    builder.push_record(["ID", row.serv_id.as_str()]);

    let fields = [
        ("Name", &row.serv_nm),
        ("Agency", &row.agency),
        ("Jurisdiction", &row.jurisdiction),
        ("Summary", &row.summary),
        ("Support", &row.support),
        ("Conditions", &row.conditions),
        ("Target", &row.target),
        ("Apply", &row.apply),
        ("Cycle", &row.cycle),
        ("Contact", &row.contact),
        ("Details", &row.detail_url),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            builder.push_record([label, value.as_str()]);
        }
    }
    for attachment in &row.attachments {
        let link = format!("{} <{}>", attachment.name, attachment.url);
        builder.push_record(["Attachment", link.as_str()]);
    }

    let mut table = builder.build();
    apply_table_style(&mut table);
    table.to_string()
}
