//! Route definitions and router construction.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::error::HttpError;
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// All endpoints, without state or fallback applied.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ask", post(handlers::ask::ask))
        .route("/stop_speech", post(handlers::speech::stop_speech))
        .route("/speech_status", get(handlers::speech::status))
        .route("/health", get(health_check))
}

fn base_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);

    api_routes()
        .with_state(state)
        .layer(build_cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
}

/// Create the main Axum router.
///
/// Unknown paths get a JSON 404. For serving a frontend as well, use
/// [`create_spa_router`].
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    base_router(ctx, cors_config).fallback(not_found)
}

/// Create a router with API routes and static asset serving.
///
/// Files under `static_dir` are served for unmatched paths, falling back
/// to `index.html`, so `/` serves the chat page.
///
/// # Example
/// ```ignore
/// let router = create_spa_router(ctx, "./static", &CorsConfig::AllowAll);
/// ```
pub fn create_spa_router<P: AsRef<Path>>(
    ctx: AxumContext,
    static_dir: P,
    cors_config: &CorsConfig,
) -> Router {
    let static_path = static_dir.as_ref();
    let index = ServeFile::new(static_path.join("index.html"));
    let serve_dir = ServeDir::new(static_path).fallback(index);

    base_router(ctx, cors_config).fallback_service(serve_dir)
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> HttpError {
    HttpError::NotFound
}
