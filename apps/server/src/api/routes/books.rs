use crate::api::handlers::{books, health};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::docstore_health))
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::read_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
}
