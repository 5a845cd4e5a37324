//! Catalog service - the in-memory book list
//!
//! The list is owned by the service and handed to handlers through `CatalogState`.
//! Its lifecycle is explicit: [`CatalogService::load`] seeds it once at startup
//! and [`CatalogService::clear`] drops every record at shutdown. Nothing is ever
//! written back to the source file.

use crate::{
    models::{BookPatch, CatalogBook},
    startup::load_catalog,
    Error, Result,
};
use parking_lot::RwLock;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogLifecycle {
    /// At least one record is held.
    Loaded,
    /// Source missing, no valid rows, or every record deleted.
    Empty,
}

pub struct CatalogService {
    books: RwLock<Vec<CatalogBook>>,
}

impl CatalogService {
    pub fn new(books: Vec<CatalogBook>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    /// Seed the catalog from a CSV source. Never fails: a missing file or bad rows
    /// are logged and leave the catalog (partially) empty.
    pub fn load(source: impl AsRef<Path>) -> Self {
        Self::new(load_catalog(source.as_ref()))
    }

    pub fn lifecycle(&self) -> CatalogLifecycle {
        if self.books.read().is_empty() {
            CatalogLifecycle::Empty
        } else {
            CatalogLifecycle::Loaded
        }
    }

    pub fn count(&self) -> usize {
        self.books.read().len()
    }

    /// Snapshot of the list in stored order
    pub fn list_books(&self) -> Vec<CatalogBook> {
        self.books.read().clone()
    }

    pub fn read_book(&self, id: i64) -> Result<CatalogBook> {
        self.books
            .read()
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| Error::book_not_found(id))
    }

    /// Overwrite the provided fields of the book in its current slot
    pub fn update_book(&self, id: i64, patch: &BookPatch) -> Result<CatalogBook> {
        let mut books = self.books.write();
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| Error::book_not_found(id))?;

        patch.apply(&mut book.fields);
        Ok(book.clone())
    }

    /// Remove the book's slot; the remaining books keep their relative order
    pub fn delete_book(&self, id: i64) -> Result<()> {
        let mut books = self.books.write();
        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| Error::book_not_found(id))?;

        books.remove(index);
        Ok(())
    }

    /// Drop every record. Returns how many were held.
    pub fn clear(&self) -> usize {
        let mut books = self.books.write();
        let dropped = books.len();
        books.clear();
        dropped
    }
}
