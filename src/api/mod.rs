//! HTTP server hosting the MCP endpoint.
//!
//! Serves a landing banner, a health check and the OpenAPI docs next to the
//! rmcp Streamable HTTP service mounted at [`Config::mcp_path`].

mod handlers;
mod routes;


use std::env;
use std::net::{IpAddr, Ipv4Addr};

use miette::Diagnostic;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::welfare::{SearchService, WelfareApi};

pub use routes::create_router;

/// Mount path of the MCP endpoint when `MCP_PATH` is unset.
pub const DEFAULT_MCP_PATH: &str = "/govcare/mcp";

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(code(welfare_mcp::api::bind))]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(welfare_mcp::api::serve))]
    Serve(#[from] std::io::Error),
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path the MCP service is nested under
    pub mcp_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            mcp_path: DEFAULT_MCP_PATH.to_string(),
        }
    }
}

impl Config {
    /// Defaults, with `MCP_PATH` applied when set.
    pub fn new() -> Self {
        match env::var("MCP_PATH") {
            Ok(path) if !path.trim().is_empty() => Self::default().with_mcp_path(path),
            _ => Self::default(),
        }
    }

    /// Override the MCP mount path; a missing leading `/` is added.
    pub fn with_mcp_path(mut self, path: impl Into<String>) -> Self {
        self.mcp_path = normalize_mount_path(path.into());
        self
    }
}

fn normalize_mount_path(path: String) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "welfare_mcp=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server until Ctrl-C.
///
/// Call [`init_tracing`] first to see request logs.
pub async fn run<A: WelfareApi + 'static>(
    config: Config,
    search: SearchService<A>,
) -> Result<(), ApiError> {
    let ct = CancellationToken::new();
    let app = create_router(search, &config.mcp_path, ct.clone()).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("API server listening on http://{}", addr);
    info!("MCP endpoint at http://{}{}", addr, config.mcp_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(ct))
        .await?;
    Ok(())
}

/// Resolve on Ctrl-C or when `ct` is cancelled elsewhere.
///
/// If the Ctrl-C handler cannot be installed the server keeps running
/// until the token is cancelled.
pub(crate) async fn shutdown_signal(ct: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Shutting down"),
            Err(e) => {
                error!("Failed to listen for Ctrl-C: {e}");
                ct.cancelled().await;
            }
        },
        _ = ct.cancelled() => {}
    }
    ct.cancel();
}
