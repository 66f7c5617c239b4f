//! `welfare` terminal client.
//!
//! Runs a search directly against the upstream API and prints a preview of
//! the same payload the MCP tool returns.

mod commands;
pub mod error;
mod utils;


use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use crate::welfare::{
    ClientConfig, SearchRequest, SearchService, Source, SummaryStore, WelfareClient,
};

pub use commands::OutputFormat;

#[derive(Parser)]
#[command(name = "welfare")]
#[command(author, version, about = "Korean welfare service search", long_about = None)]
pub struct Cli {
    /// Override the upstream API base URL (default: WELFARE_API_BASE_URL env or data.go.kr)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search national and local welfare programs
    Search(SearchArgs),
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Keyword, e.g. 청년, 주거, 신혼부부
    search_wrd: String,
    /// Age in years
    #[arg(long)]
    age: Option<u32>,
    /// Province name (local registry only), e.g. 서울특별시
    #[arg(long)]
    ctpv: Option<String>,
    /// District name (local registry only), e.g. 송파구
    #[arg(long)]
    sgg: Option<String>,
    /// Registry to search; repeat for both (default: both)
    #[arg(long = "source", value_enum)]
    sources: Vec<SourceArg>,
    /// Upstream page number
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    page_no: Option<u32>,
    /// Rows per upstream page (max 50)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    num_of_rows: Option<u32>,
    /// Programs to enrich with details (default 6, max 20)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=20))]
    max_results: Option<u32>,
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceArg {
    National,
    Local,
}

impl From<SourceArg> for Source {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::National => Source::National,
            SourceArg::Local => Source::Local,
        }
    }
}

impl SearchArgs {
    fn into_request(self) -> (SearchRequest, OutputFormat) {
        let sources = (!self.sources.is_empty())
            .then(|| self.sources.into_iter().map(Source::from).collect());
        let request = SearchRequest {
            age: self.age,
            search_wrd: self.search_wrd,
            ctpv_nm: self.ctpv,
            sgg_nm: self.sgg,
            sources,
            page_no: self.page_no,
            num_of_rows: self.num_of_rows,
            max_results: self.max_results,
        };
        (request, self.format)
    }
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    let service = SearchService::new(Arc::new(WelfareClient::new(config)), SummaryStore::new());

    match cli.command {
        Commands::Search(args) => {
            let (request, format) = args.into_request();
            let output = commands::search::search(&service, request, format).await?;
            println!("{}", output);
        }
    }
    Ok(())
}
