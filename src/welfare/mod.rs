//! Welfare service search over the data.go.kr national and local registries.
//!
//! - **xml**: XML documents as generic JSON trees
//! - **normalize**: per-registry field tables and record mapping
//! - **client**: the four upstream operations behind the `WelfareApi` trait
//! - **search**: list fan-out, truncation and detail merge
//! - **summary**: single-slot store for the last search

pub mod client;
pub mod error;
pub mod models;
pub mod normalize;
pub mod search;
pub mod summary;
pub mod xml;

pub use client::{ClientConfig, Endpoint, ListQuery, WelfareApi, WelfareClient};
pub use error::{WelfareError, WelfareResult};
pub use models::{EnrichedRow, ListRow, Source, WelfareAttachment, WelfareDetail, WelfareListItem};
pub use search::{QueryEcho, SearchRequest, SearchResponse, SearchService};
pub use summary::{SummaryItem, SummaryResource, SummaryStore};

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod normalize_test;
