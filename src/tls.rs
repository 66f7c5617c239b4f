//! Process-wide rustls setup.
//!
//! reqwest is built without a bundled crypto provider, so each binary
//! installs ring once before the first HTTPS request.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum TlsError {
    #[error("A TLS crypto provider is already installed for this process")]
    #[diagnostic(
        code(welfare_mcp::tls::provider_installed),
        help("Install the provider once, at process start.")
    )]
    ProviderAlreadyInstalled,
}

/// Install ring as the process-wide rustls crypto provider.
pub fn install_crypto_provider() -> Result<(), TlsError> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| TlsError::ProviderAlreadyInstalled)
}
