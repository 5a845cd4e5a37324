//! PostgreSQL-backed `BookStore` implementation
//!
//! Each book is a JSONB document in a single table (the "collection"), keyed by a
//! UUID generated on insert.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::{
    db::traits::BookStore,
    models::{BookFields, BookPatch, StoredBook},
    Error, Result,
};

/// PostgreSQL-backed BookStore implementation
#[derive(Clone)]
pub struct PostgresBookStore {
    pub(crate) pool: PgPool,
    collection: String,
}

impl PostgresBookStore {
    /// `collection` is interpolated into SQL; callers pass a name that passed
    /// `Config::validate`.
    pub fn new(pool: PgPool, collection: impl Into<String>) -> Self {
        Self {
            pool,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Create the collection table if it does not exist yet
    pub async fn ensure_collection(&self) -> Result<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY,
                seq BIGSERIAL,
                document JSONB NOT NULL
             )",
            self.collection
        );

        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(())
    }

    fn row_to_book(row: &PgRow) -> Result<StoredBook> {
        let id: Uuid = row.get("id");
        let document: JsonValue = row.get("document");
        let fields: BookFields = serde_json::from_value(document).map_err(|e| {
            Error::Internal(format!("Malformed book document {}: {}", id, e))
        })?;

        Ok(StoredBook::new(id.to_string(), fields))
    }
}

#[async_trait]
impl BookStore for PostgresBookStore {
    async fn insert(&self, fields: &BookFields) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let document = serde_json::to_value(fields)
            .map_err(|e| Error::Internal(format!("Failed to encode book document: {}", e)))?;

        let sql = format!(
            "INSERT INTO {} (id, document) VALUES ($1, $2)",
            self.collection
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(&document)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<StoredBook>> {
        let sql = format!(
            "SELECT id, document FROM {} ORDER BY seq ASC",
            self.collection
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        rows.iter().map(Self::row_to_book).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredBook>> {
        let sql = format!("SELECT id, document FROM {} WHERE id = $1", self.collection);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.as_ref().map(Self::row_to_book).transpose()
    }

    async fn update_fields(&self, id: Uuid, patch: &BookPatch) -> Result<bool> {
        let changes = serde_json::to_value(patch)
            .map_err(|e| Error::Internal(format!("Failed to encode book patch: {}", e)))?;

        // `||` on JSONB overwrites the keys present in `changes` and keeps the rest.
        // An empty patch still counts the row as matched.
        let sql = format!(
            "UPDATE {} SET document = document || $2 WHERE id = $1",
            self.collection
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(&changes)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.collection);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
