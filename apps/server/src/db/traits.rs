//! Storage trait for the document collection

use crate::{
    models::{BookFields, BookPatch, StoredBook},
    Result,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Abstract interface over the collection holding book documents
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a new document and return the identifier the store assigned to it
    async fn insert(&self, fields: &BookFields) -> Result<Uuid>;

    /// All documents, in the store's natural iteration order
    async fn find_all(&self) -> Result<Vec<StoredBook>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredBook>>;

    /// Merge the provided fields into the document.
    ///
    /// Returns `false` when no document matched `id`.
    async fn update_fields(&self, id: Uuid, patch: &BookPatch) -> Result<bool>;

    /// Returns `false` when no document matched `id`.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Round-trip to the backing store (health check)
    async fn ping(&self) -> Result<()>;
}
