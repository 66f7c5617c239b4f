//! Welfare MCP server binary.
//!
//! Builds the upstream client from the environment and hands it to the HTTP
//! layer, which stays agnostic of the concrete API implementation.

use std::net::IpAddr;
use std::sync::Arc;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use tracing::warn;
use welfare_mcp::api::{self, ApiError, Config};
use welfare_mcp::tls::{TlsError, install_crypto_provider};
use welfare_mcp::welfare::{ClientConfig, SearchService, SummaryStore, WelfareClient};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("TLS setup failed: {0}")]
    #[diagnostic(code(welfare_mcp::binary::tls))]
    Tls(#[from] TlsError),

    #[error("API server error: {0}")]
    #[diagnostic(code(welfare_mcp::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "welfare-mcp")]
#[command(author, version, about = "MCP server for Korean welfare service search", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Path the MCP endpoint is mounted on
    #[arg(long, env = "MCP_PATH")]
    mcp_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    install_crypto_provider()?;

    let mut config = Config::new();
    config.host = cli.host;
    config.port = cli.port;
    if let Some(path) = cli.mcp_path {
        config = config.with_mcp_path(path);
    }

    let client_config = ClientConfig::from_env();
    let key_missing = client_config.service_key.is_none();
    let search = SearchService::new(Arc::new(WelfareClient::new(client_config)), SummaryStore::new());

    api::init_tracing();
    if key_missing {
        warn!("WELFARE_API_KEY/SERVICE_KEY not set; search_welfare will fail until configured");
    }

    api::run(config, search).await?;

    Ok(())
}
