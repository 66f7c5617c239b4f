use miette::Diagnostic;
use thiserror::Error;

use crate::welfare::WelfareError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Welfare(#[from] WelfareError),

    #[error("Failed to render output: {message}")]
    #[diagnostic(code(welfare_mcp::cli::serialization))]
    Serialization { message: String },
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
