//! API route configuration.

use axum::Router;
use axum::routing::get;
use tokio_util::sync::CancellationToken;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, HealthResponse};
use crate::mcp::create_mcp_service;
use crate::welfare::{SearchService, WelfareApi};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Welfare MCP",
        description = "MCP server for Korean national and local welfare services",
        license(name = "GPL-2.0")
    ),
    paths(handlers::root, handlers::health),
    components(schemas(HealthResponse)),
    tags(
        (name = "system", description = "System health and status endpoints")
    )
)]
pub struct ApiDoc;

/// Create the router with the MCP service nested at `mcp_path`
///
/// A `mcp_path` of `/` makes the MCP service the fallback for every path
/// not claimed by `/health` or `/docs`.
pub fn create_router<A: WelfareApi + 'static>(
    search: SearchService<A>,
    mcp_path: &str,
    ct: CancellationToken,
) -> Router {
    let api = ApiDoc::openapi();
    let mcp = create_mcp_service(search, ct);

    let router = Router::new()
        .route("/health", get(handlers::health))
        .merge(Scalar::with_url("/docs", api));

    if mcp_path == "/" {
        router.fallback_service(mcp)
    } else {
        router
            .route("/", get(handlers::root))
            .nest_service(mcp_path, mcp)
    }
}
