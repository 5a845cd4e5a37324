use crate::api::handlers::{catalog, health};
use crate::state::CatalogState;
use axum::{routing::get, Router};

pub fn catalog_routes() -> Router<CatalogState> {
    Router::new()
        .route("/health", get(health::catalog_health))
        // Static segment: matched ahead of `/books/:id`
        .route("/books/count", get(catalog::count_books))
        .route("/books", get(catalog::list_books))
        .route(
            "/books/:id",
            get(catalog::read_book)
                .put(catalog::update_book)
                .delete(catalog::delete_book),
        )
}
