//! In-memory catalog handlers

use crate::{api::extract::CatalogBookId, models::BookPatch, state::CatalogState, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub async fn count_books(State(state): State<CatalogState>) -> Response {
    (StatusCode::OK, Json(state.catalog.count())).into_response()
}

pub async fn list_books(State(state): State<CatalogState>) -> Response {
    (StatusCode::OK, Json(state.catalog.list_books())).into_response()
}

pub async fn read_book(
    State(state): State<CatalogState>,
    CatalogBookId(id): CatalogBookId,
) -> Result<Response> {
    let book = state.catalog.read_book(id)?;

    Ok((StatusCode::OK, Json(book)).into_response())
}

pub async fn update_book(
    State(state): State<CatalogState>,
    CatalogBookId(id): CatalogBookId,
    Json(patch): Json<BookPatch>,
) -> Result<Response> {
    let book = state.catalog.update_book(id, &patch)?;

    Ok((StatusCode::OK, Json(book)).into_response())
}

pub async fn delete_book(
    State(state): State<CatalogState>,
    CatalogBookId(id): CatalogBookId,
) -> Result<Response> {
    state.catalog.delete_book(id)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
