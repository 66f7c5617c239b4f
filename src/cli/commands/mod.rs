pub mod search;

use clap::ValueEnum;

/// How search results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One row per program, grouped by registry
    Table,
    /// Pretty-printed response payload
    Json,
    /// One card per program with every known field
    Cards,
}
