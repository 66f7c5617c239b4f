//! HTTP client for the data.go.kr welfare information API.
//!
//! Four fixed GET endpoints (national/local × list/detail) answer in XML.
//! Every request carries the `serviceKey` credential; there are no retries
//! and no caching at this layer.

use std::env;
use std::future::Future;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use super::error::{WelfareError, WelfareResult};
use super::models::{Source, WelfareDetail, WelfareListItem};
use super::normalize::{map_detail_for, map_list_item_for, normalize_array};
use super::xml;

/// Default upstream host and provider prefix.
pub const DEFAULT_BASE_URL: &str = "https://apis.data.go.kr/B554287";

/// Keyword search mode for the national list endpoint.
const NATIONAL_KEYWORD_SEARCH: &str = "003";

/// Upstream endpoints, relative to the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    NationalList,
    NationalDetail,
    LocalList,
    LocalDetail,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::NationalList => "NationalWelfareInformationsV001/NationalWelfarelistV001",
            Endpoint::NationalDetail => {
                "NationalWelfareInformationsV001/NationalWelfaredetailedV001"
            }
            Endpoint::LocalList => "LocalGovernmentWelfareInformations/LcgvWelfarelist",
            Endpoint::LocalDetail => "LocalGovernmentWelfareInformations/LcgvWelfaredetailed",
        }
    }

    fn list(source: Source) -> Self {
        match source {
            Source::National => Endpoint::NationalList,
            Source::Local => Endpoint::LocalList,
        }
    }

    fn detail(source: Source) -> Self {
        match source {
            Source::National => Endpoint::NationalDetail,
            Source::Local => Endpoint::LocalDetail,
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub service_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            service_key: None,
        }
    }
}

impl ClientConfig {
    /// Build configuration from the environment.
    ///
    /// The credential comes from `WELFARE_API_KEY`, then `SERVICE_KEY`
    /// (first non-empty wins). `WELFARE_API_BASE_URL` overrides the host.
    pub fn from_env() -> Self {
        let service_key = ["WELFARE_API_KEY", "SERVICE_KEY"]
            .iter()
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.is_empty());
        let base_url = env::var("WELFARE_API_BASE_URL")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url,
            service_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_service_key(mut self, service_key: impl Into<String>) -> Self {
        self.service_key = Some(service_key.into());
        self
    }
}

/// Parameters for a list request.
///
/// `ctpv_nm`/`sgg_nm` (province/district) only apply to the local registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page_no: u32,
    pub num_of_rows: u32,
    pub age: Option<u32>,
    pub search_wrd: Option<String>,
    pub ctpv_nm: Option<String>,
    pub sgg_nm: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page_no: 1,
            num_of_rows: 10,
            age: None,
            search_wrd: None,
            ctpv_nm: None,
            sgg_nm: None,
        }
    }
}

/// Access to the four upstream operations.
///
/// Implemented by [`WelfareClient`]; the search orchestrator is generic over it.
pub trait WelfareApi: Send + Sync {
    fn fetch_national_list(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = WelfareResult<Vec<WelfareListItem>>> + Send;

    fn fetch_local_list(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = WelfareResult<Vec<WelfareListItem>>> + Send;

    /// `Ok(None)` when upstream has no record for `serv_id`.
    fn fetch_national_detail(
        &self,
        serv_id: &str,
    ) -> impl Future<Output = WelfareResult<Option<WelfareDetail>>> + Send;

    /// `Ok(None)` when upstream has no record for `serv_id`.
    fn fetch_local_detail(
        &self,
        serv_id: &str,
    ) -> impl Future<Output = WelfareResult<Option<WelfareDetail>>> + Send;
}

/// reqwest-backed [`WelfareApi`].
#[derive(Clone)]
pub struct WelfareClient {
    config: ClientConfig,
    http: Client,
}

impl WelfareClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the query string for a request.
    ///
    /// The credential goes first and verbatim (keys are issued pre-encoded);
    /// the remaining non-empty parameters are form-encoded in the given order.
    pub(crate) fn build_query(&self, params: &[(&str, Option<String>)]) -> WelfareResult<String> {
        let service_key = self
            .config
            .service_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(WelfareError::MissingServiceKey)?;

        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in params {
            if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
                serializer.append_pair(name, value);
            }
        }
        let rest = serializer.finish();

        Ok(if rest.is_empty() {
            format!("serviceKey={service_key}")
        } else {
            format!("serviceKey={service_key}&{rest}")
        })
    }

    pub(crate) fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path()
        )
    }

    async fn fetch_xml(
        &self,
        endpoint: Endpoint,
        params: &[(&str, Option<String>)],
    ) -> WelfareResult<Value> {
        let query = self.build_query(params)?;
        let url = format!("{}?{}", self.endpoint_url(endpoint), query);

        debug!(?endpoint, "requesting welfare API");
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await?;
            return Err(WelfareError::Upstream { status, body });
        }

        let text = response.text().await?;
        xml::parse(&text)
    }

    fn list_params(source: Source, query: &ListQuery) -> Vec<(&'static str, Option<String>)> {
        let mut params = vec![
            ("pageNo", Some(query.page_no.to_string())),
            ("numOfRows", Some(query.num_of_rows.to_string())),
        ];
        match source {
            Source::National => {
                params.push(("srchKeyCode", Some(NATIONAL_KEYWORD_SEARCH.to_string())));
            }
            Source::Local => {
                params.push(("ctpvNm", query.ctpv_nm.clone()));
                params.push(("sggNm", query.sgg_nm.clone()));
            }
        }
        params.push(("age", query.age.map(|age| age.to_string())));
        params.push(("searchWrd", query.search_wrd.clone()));
        params
    }

    async fn fetch_list(
        &self,
        source: Source,
        query: &ListQuery,
    ) -> WelfareResult<Vec<WelfareListItem>> {
        let params = Self::list_params(source, query);
        let tree = self.fetch_xml(Endpoint::list(source), &params).await?;

        let nodes = tree.get("wantedList").and_then(|list| list.get("servList"));
        let items: Vec<WelfareListItem> = normalize_array(nodes)
            .into_iter()
            .map(|node| map_list_item_for(source, node))
            .filter(|item| !item.serv_id.is_empty())
            .collect();

        debug!(%source, count = items.len(), "fetched welfare list");
        Ok(items)
    }

    async fn fetch_detail(
        &self,
        source: Source,
        serv_id: &str,
    ) -> WelfareResult<Option<WelfareDetail>> {
        let params = [("servId", Some(serv_id.to_string()))];
        let tree = self.fetch_xml(Endpoint::detail(source), &params).await?;

        let detail = match tree.get("wantedDtl") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if text.is_empty() => None,
            Some(node) => Some(map_detail_for(source, node)),
        };
        if detail.is_none() {
            debug!(%source, serv_id, "no welfare detail upstream");
        }
        Ok(detail)
    }
}

impl WelfareApi for WelfareClient {
    #[instrument(skip(self))]
    async fn fetch_national_list(&self, query: &ListQuery) -> WelfareResult<Vec<WelfareListItem>> {
        self.fetch_list(Source::National, query).await
    }

    #[instrument(skip(self))]
    async fn fetch_local_list(&self, query: &ListQuery) -> WelfareResult<Vec<WelfareListItem>> {
        self.fetch_list(Source::Local, query).await
    }

    #[instrument(skip(self))]
    async fn fetch_national_detail(&self, serv_id: &str) -> WelfareResult<Option<WelfareDetail>> {
        self.fetch_detail(Source::National, serv_id).await
    }

    #[instrument(skip(self))]
    async fn fetch_local_detail(&self, serv_id: &str) -> WelfareResult<Option<WelfareDetail>> {
        self.fetch_detail(Source::Local, serv_id).await
    }
}
