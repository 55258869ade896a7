//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! CORS is wide open — the frontend is served from a different origin and
//! the service carries no credentials.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Maximum request body size (64 MB) — room for a batch of scanned PDFs.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Build the API router.
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/", get(endpoints::health::check))
        .route("/process", post(endpoints::process::handle))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
}
