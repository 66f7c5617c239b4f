//! Welfare API error types.
//!
//! Uses miette for diagnostic output and thiserror for derive macros,
//! the same way the database and CLI layers do.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while talking to the upstream welfare API.
///
/// A detail lookup that finds nothing is not an error; it is `Ok(None)`.
#[derive(Error, Diagnostic, Debug)]
pub enum WelfareError {
    #[error("Missing API key. Set WELFARE_API_KEY or SERVICE_KEY in the environment.")]
    #[diagnostic(
        code(welfare_mcp::welfare::missing_service_key),
        help("Export WELFARE_API_KEY (or SERVICE_KEY) with the key issued by data.go.kr.")
    )]
    MissingServiceKey,

    #[error("API request failed ({status}): {body}")]
    #[diagnostic(code(welfare_mcp::welfare::upstream))]
    Upstream { status: u16, body: String },

    #[error("Failed to reach welfare API: {0}")]
    #[diagnostic(code(welfare_mcp::welfare::transport))]
    Transport(#[from] reqwest::Error),

    #[error("Malformed XML from welfare API: {message}")]
    #[diagnostic(code(welfare_mcp::welfare::xml))]
    Xml { message: String },
}

/// Result type for welfare API operations.
pub type WelfareResult<T> = Result<T, WelfareError>;
