//! CRUD service - business logic for the document-store book collection

use crate::{
    db::BookStore,
    models::{BookFields, BookPatch, StoredBook},
    Error, Result,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct CrudService {
    store: Arc<dyn BookStore>,
}

/// Translate a path identifier into the store's native id form.
///
/// Anything that does not parse is reported as a missing book, not as a
/// malformed request: clients only ever see 404 for a bad id.
pub fn parse_book_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| Error::book_not_found(id))
}

impl CrudService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Create a new book (POST /books)
    ///
    /// The store assigns the identifier; the response is re-read from the store.
    pub async fn create_book(&self, fields: BookFields) -> Result<StoredBook> {
        let id = self.store.insert(&fields).await?;

        tracing::debug!(book_id = %id, "Book created");

        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::Internal(format!("Book {} vanished after insert", id)))
    }

    pub async fn list_books(&self) -> Result<Vec<StoredBook>> {
        self.store.find_all().await
    }

    pub async fn read_book(&self, id: &str) -> Result<StoredBook> {
        let key = parse_book_id(id)?;
        self.store
            .find_by_id(key)
            .await?
            .ok_or_else(|| Error::book_not_found(id))
    }

    /// Merge the provided fields into an existing book (PUT /books/{id})
    ///
    /// Returns the record as stored after the write, not the patch result.
    pub async fn update_book(&self, id: &str, patch: BookPatch) -> Result<StoredBook> {
        let key = parse_book_id(id)?;

        if !self.store.update_fields(key, &patch).await? {
            return Err(Error::book_not_found(id));
        }

        tracing::debug!(book_id = %key, "Book updated");

        // A concurrent delete between the write and the re-read surfaces as 404.
        self.store
            .find_by_id(key)
            .await?
            .ok_or_else(|| Error::book_not_found(id))
    }

    pub async fn delete_book(&self, id: &str) -> Result<()> {
        let key = parse_book_id(id)?;

        if !self.store.delete(key).await? {
            return Err(Error::book_not_found(id));
        }

        tracing::debug!(book_id = %key, "Book deleted");
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }
}
