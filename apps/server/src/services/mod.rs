//! Service layer - business logic behind the HTTP handlers

pub mod catalog;
pub mod crud;

pub use catalog::{CatalogLifecycle, CatalogService};
pub use crud::{parse_book_id, CrudService};
