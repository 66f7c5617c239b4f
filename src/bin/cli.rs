use miette::Result;
use welfare_mcp::tls::install_crypto_provider;

#[tokio::main]
async fn main() -> Result<()> {
    install_crypto_provider()?;
    welfare_mcp::cli::run().await
}
