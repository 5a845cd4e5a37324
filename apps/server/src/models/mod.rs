//! Book record models shared by both services

mod book;

pub use book::{Book, BookFields, BookPatch, CatalogBook, StoredBook};
