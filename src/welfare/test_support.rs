//! Shared fixtures for welfare tests: a recording in-memory API and a stub upstream server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::{StatusCode, Uri, header};
use tokio::net::TcpListener;

use super::client::{ListQuery, WelfareApi};
use super::error::{WelfareError, WelfareResult};
use super::models::{Source, WelfareAttachment, WelfareDetail, WelfareListItem};

/// Install the ring provider; reqwest is built without a default one.
pub fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

pub fn list_item(serv_id: &str, serv_nm: &str) -> WelfareListItem {
    WelfareListItem {
        serv_id: serv_id.to_string(),
        serv_nm: Some(serv_nm.to_string()),
        agency: Some("보건복지부".to_string()),
        summary: Some(format!("{serv_nm} 요약")),
        detail_url: Some(format!("https://www.bokjiro.go.kr/{serv_id}")),
        ..Default::default()
    }
}

pub fn detail(serv_id: &str) -> WelfareDetail {
    WelfareDetail {
        serv_id: serv_id.to_string(),
        summary: Some(format!("{serv_id} 상세 개요")),
        conditions: Some("중위소득 150% 이하".to_string()),
        apply: Some("온라인 신청".to_string()),
        attachments: vec![WelfareAttachment {
            name: format!("{serv_id} 신청서.hwp"),
            url: format!("https://www.bokjiro.go.kr/files/{serv_id}.hwp"),
        }],
        ..Default::default()
    }
}

/// In-memory [`WelfareApi`] that records every call in order.
#[derive(Default)]
pub struct StubApi {
    pub national: Vec<WelfareListItem>,
    pub local: Vec<WelfareListItem>,
    pub details: HashMap<(Source, String), WelfareDetail>,
    pub failing_list: Option<Source>,
    pub failing_detail: Option<String>,
    pub calls: Mutex<Vec<String>>,
    pub list_queries: Mutex<Vec<ListQuery>>,
}

impl StubApi {
    pub fn with_detail(mut self, source: Source, detail: WelfareDetail) -> Self {
        self.details.insert((source, detail.serv_id.clone()), detail);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn list(&self, source: Source, query: &ListQuery) -> WelfareResult<Vec<WelfareListItem>> {
        self.record(format!("list:{source}"));
        self.list_queries.lock().unwrap().push(query.clone());
        if self.failing_list == Some(source) {
            return Err(WelfareError::Upstream {
                status: 500,
                body: "list unavailable".to_string(),
            });
        }
        Ok(match source {
            Source::National => self.national.clone(),
            Source::Local => self.local.clone(),
        })
    }

    fn detail(&self, source: Source, serv_id: &str) -> WelfareResult<Option<WelfareDetail>> {
        self.record(format!("detail:{source}:{serv_id}"));
        if self.failing_detail.as_deref() == Some(serv_id) {
            return Err(WelfareError::Upstream {
                status: 502,
                body: "detail unavailable".to_string(),
            });
        }
        Ok(self.details.get(&(source, serv_id.to_string())).cloned())
    }
}

impl WelfareApi for StubApi {
    async fn fetch_national_list(&self, query: &ListQuery) -> WelfareResult<Vec<WelfareListItem>> {
        self.list(Source::National, query)
    }

    async fn fetch_local_list(&self, query: &ListQuery) -> WelfareResult<Vec<WelfareListItem>> {
        self.list(Source::Local, query)
    }

    async fn fetch_national_detail(&self, serv_id: &str) -> WelfareResult<Option<WelfareDetail>> {
        self.detail(Source::National, serv_id)
    }

    async fn fetch_local_detail(&self, serv_id: &str) -> WelfareResult<Option<WelfareDetail>> {
        self.detail(Source::Local, serv_id)
    }
}

type Responder = Arc<dyn Fn(&str, &str) -> (u16, String) + Send + Sync>;

/// Stub upstream HTTP server answering with canned XML.
pub struct Upstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Upstream {
    /// Path-and-query of every request received, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Spawn a stub upstream; `respond(path, query)` returns the status and body.
pub async fn spawn_upstream(
    respond: impl Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
) -> Upstream {
    let respond: Responder = Arc::new(respond);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);

    let app = Router::new().fallback(move |uri: Uri| {
        let respond = Arc::clone(&respond);
        let recorded = Arc::clone(&recorded);
        async move {
            recorded.lock().unwrap().push(uri.to_string());
            let (status, body) = respond(uri.path(), uri.query().unwrap_or_default());
            (
                StatusCode::from_u16(status).unwrap(),
                [(header::CONTENT_TYPE, "application/xml;charset=UTF-8")],
                body,
            )
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Upstream {
        base_url: format!("http://{}", addr),
        requests,
    }
}

/// National list document with one `servList` per id.
pub fn national_list_xml(ids: &[&str]) -> String {
    let rows: String = ids
        .iter()
        .map(|id| {
            format!(
                "<servList><servId>{id}</servId><servNm>서비스 {id}</servNm>\
                 <jurMnofNm>보건복지부</jurMnofNm><jurOrgNm>복지정책과</jurOrgNm>\
                 <servDgst>목록 요약 {id}</servDgst><srvPvsnNm>현금지급</srvPvsnNm>\
                 <trgterIndvdlArray>청년</trgterIndvdlArray><sprtCycNm>월</sprtCycNm>\
                 <rprsCtadr>129</rprsCtadr>\
                 <servDtlLink>https://www.bokjiro.go.kr/{id}</servDtlLink></servList>"
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><wantedList><totalCount>{}</totalCount>\
         <pageNo>1</pageNo><numOfRows>10</numOfRows><resultCode>0</resultCode>{rows}</wantedList>",
        ids.len()
    )
}

/// National detail document for `id`.
pub fn national_detail_xml(id: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><wantedDtl><servId>{id}</servId>\
         <servNm>서비스 {id}</servNm><jurMnofNm>보건복지부</jurMnofNm>\
         <wlfareInfoOutlCn>상세 개요 {id}</wlfareInfoOutlCn><alwServCn>월 20만원</alwServCn>\
         <slctCritCn>중위소득 150% 이하</slctCritCn><aplyMtdCn>온라인 신청</aplyMtdCn>\
         <basfrmList><servSeDetailNm>신청서.hwp</servSeDetailNm>\
         <servSeDetailLink>https://www.bokjiro.go.kr/form/{id}.hwp</servSeDetailLink></basfrmList>\
         </wantedDtl>"
    )
}

/// Detail document with no `wantedDtl` node.
pub fn empty_detail_xml() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?><OpenAPI_ServiceResponse><cmmMsgHeader>\
     <returnAuthMsg>NODATA_ERROR</returnAuthMsg></cmmMsgHeader></OpenAPI_ServiceResponse>"
        .to_string()
}
