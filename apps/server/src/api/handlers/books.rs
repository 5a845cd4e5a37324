//! Document-store book handlers

use crate::{
    models::{BookFields, BookPatch},
    state::AppState,
    Result,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Create a book; the store assigns its id
pub async fn create_book(
    State(state): State<AppState>,
    Json(fields): Json<BookFields>,
) -> Result<Response> {
    let book = state.crud_service.create_book(fields).await?;

    Ok((StatusCode::CREATED, Json(book)).into_response())
}

pub async fn list_books(State(state): State<AppState>) -> Result<Response> {
    let books = state.crud_service.list_books().await?;

    Ok((StatusCode::OK, Json(books)).into_response())
}

pub async fn read_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let book = state.crud_service.read_book(&id).await?;

    Ok((StatusCode::OK, Json(book)).into_response())
}

/// Partial update; responds with the stored record after the write
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<BookPatch>,
) -> Result<Response> {
    let book = state.crud_service.update_book(&id, patch).await?;

    Ok((StatusCode::OK, Json(book)).into_response())
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    state.crud_service.delete_book(&id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
