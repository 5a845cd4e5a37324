//! Health check handlers

use crate::state::{AppState, CatalogState};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Reports 503 when the document database does not answer
pub async fn docstore_health(State(state): State<AppState>) -> Response {
    let service = state.config.logging.service_name.as_str();

    match state.crud_service.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": service,
                "version": env!("CARGO_PKG_VERSION"),
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "service": service,
                    "version": env!("CARGO_PKG_VERSION"),
                })),
            )
                .into_response()
        }
    }
}

pub async fn catalog_health(State(state): State<CatalogState>) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": state.config.logging.service_name,
            "version": env!("CARGO_PKG_VERSION"),
            "lifecycle": state.catalog.lifecycle(),
            "books": state.catalog.count(),
        })),
    )
        .into_response()
}
