//! HTTP API - routers, handlers and extractors

pub mod extract;
pub mod handlers;
pub mod routes;

use crate::{
    config::ServerConfig,
    state::{AppState, CatalogState},
};
use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Router of the document-store service
pub fn create_router(state: AppState) -> Router {
    let server = state.config.server.clone();
    let router = routes::books::book_routes().with_state(state);

    with_common_layers(router, &server)
}

/// Router of the in-memory catalog service
pub fn create_catalog_router(state: CatalogState) -> Router {
    let server = state.config.server.clone();
    let router = routes::catalog::catalog_routes().with_state(state);

    with_common_layers(router, &server)
}

fn with_common_layers(router: Router, server: &ServerConfig) -> Router {
    let router = router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::max(server.max_request_body_size)),
    );

    match cors_layer(&server.cors_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// No configured origins means no CORS headers at all.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
