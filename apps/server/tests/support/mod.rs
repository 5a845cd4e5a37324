//! Shared helpers for the integration tests.
//!
//! Routers are driven in-process with `tower::ServiceExt::oneshot`; no socket is
//! bound. The document-store router runs over [`MemoryBookStore`] unless a test
//! opts into PostgreSQL with [`with_postgres_app`].

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use bookshelf::{
    api::{create_catalog_router, create_router},
    config::Config,
    db::{BookStore, PostgresBookStore},
    models::{BookFields, BookPatch, StoredBook},
    state::{AppState, CatalogState},
    Error,
};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use serde::Serialize;
use std::{future::Future, io::Write, pin::Pin, sync::Arc};
use tower::ServiceExt;
use uuid::Uuid;

pub type TestFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Vec<u8>>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_extra_headers(method, uri, body, &[]).await
    }

    pub async fn request_with_extra_headers(
        &self,
        method: Method,
        uri: &str,
        body: Option<Vec<u8>>,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }

        let body = match body {
            Some(bytes) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(bytes)
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body)?).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await?.to_bytes();

        Ok((status, headers, bytes))
    }

    /// Request and decode the JSON response body
    pub async fn request_json(
        &self,
        method: Method,
        uri: &str,
        body: Option<Vec<u8>>,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let (status, _headers, bytes) = self.request(method, uri, body).await?;
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, value))
    }
}

pub fn to_json_body<T: Serialize>(value: &T) -> anyhow::Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(
        actual, expected,
        "{context}: expected {expected}, got {actual}"
    );
}

// ============================================================================
// Document store
// ============================================================================

/// In-process `BookStore` keeping documents in insertion order
#[derive(Default)]
pub struct MemoryBookStore {
    documents: Mutex<Vec<(Uuid, BookFields)>>,
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn insert(&self, fields: &BookFields) -> bookshelf::Result<Uuid> {
        let id = Uuid::new_v4();
        self.documents.lock().push((id, fields.clone()));
        Ok(id)
    }

    async fn find_all(&self) -> bookshelf::Result<Vec<StoredBook>> {
        Ok(self
            .documents
            .lock()
            .iter()
            .map(|(id, fields)| StoredBook::new(id.to_string(), fields.clone()))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> bookshelf::Result<Option<StoredBook>> {
        Ok(self
            .documents
            .lock()
            .iter()
            .find(|(doc_id, _)| *doc_id == id)
            .map(|(doc_id, fields)| StoredBook::new(doc_id.to_string(), fields.clone())))
    }

    async fn update_fields(&self, id: Uuid, patch: &BookPatch) -> bookshelf::Result<bool> {
        let mut documents = self.documents.lock();
        match documents.iter_mut().find(|(doc_id, _)| *doc_id == id) {
            Some((_, fields)) => {
                patch.apply(fields);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> bookshelf::Result<bool> {
        let mut documents = self.documents.lock();
        let before = documents.len();
        documents.retain(|(doc_id, _)| *doc_id != id);
        Ok(documents.len() != before)
    }

    async fn ping(&self) -> bookshelf::Result<()> {
        Ok(())
    }
}

/// Store whose every call fails the way a lost connection does
pub struct UnavailableBookStore;

#[async_trait]
impl BookStore for UnavailableBookStore {
    async fn insert(&self, _fields: &BookFields) -> bookshelf::Result<Uuid> {
        Err(Error::Database(sqlx::Error::PoolClosed))
    }

    async fn find_all(&self) -> bookshelf::Result<Vec<StoredBook>> {
        Err(Error::Database(sqlx::Error::PoolClosed))
    }

    async fn find_by_id(&self, _id: Uuid) -> bookshelf::Result<Option<StoredBook>> {
        Err(Error::Database(sqlx::Error::PoolClosed))
    }

    async fn update_fields(&self, _id: Uuid, _patch: &BookPatch) -> bookshelf::Result<bool> {
        Err(Error::Database(sqlx::Error::PoolClosed))
    }

    async fn delete(&self, _id: Uuid) -> bookshelf::Result<bool> {
        Err(Error::Database(sqlx::Error::PoolClosed))
    }

    async fn ping(&self) -> bookshelf::Result<()> {
        Err(Error::Database(sqlx::Error::PoolClosed))
    }
}

pub async fn with_docstore_app<F>(f: F) -> anyhow::Result<()>
where
    F: FnOnce(TestApp) -> TestFuture,
{
    with_docstore_app_over(Arc::new(MemoryBookStore::default()), |_| {}, f).await
}

pub async fn with_docstore_app_with_config<C, F>(configure: C, f: F) -> anyhow::Result<()>
where
    C: FnOnce(&mut Config),
    F: FnOnce(TestApp) -> TestFuture,
{
    with_docstore_app_over(Arc::new(MemoryBookStore::default()), configure, f).await
}

pub async fn with_docstore_app_over<C, F>(
    store: Arc<dyn BookStore>,
    configure: C,
    f: F,
) -> anyhow::Result<()>
where
    C: FnOnce(&mut Config),
    F: FnOnce(TestApp) -> TestFuture,
{
    let mut config = Config::default();
    configure(&mut config);

    let state = AppState::with_store(config, store);
    f(TestApp::new(create_router(state))).await
}

/// Runs against a real PostgreSQL server in a throwaway collection.
///
/// Uses `BOOKS__DATABASE__TEST_DATABASE_URL` (or `test_database_url` in a config
/// file); the database named by `database.name` must exist. Without it the test
/// body is skipped.
pub async fn with_postgres_app<F>(f: F) -> anyhow::Result<()>
where
    F: FnOnce(TestApp) -> TestFuture,
{
    let mut config = Config::load()?;
    let Some(url) = config.database.test_database_url.clone() else {
        eprintln!("database.test_database_url is not configured, skipping");
        return Ok(());
    };
    config.database.collection = format!("books_test_{}", Uuid::new_v4().simple());
    let collection = config.database.collection.clone();

    let state = AppState::connect(config, &url).await?;
    let pool = state
        .db_pool
        .clone()
        .ok_or_else(|| anyhow::anyhow!("postgres state without a pool"))?;

    let result = f(TestApp::new(create_router(state))).await;

    sqlx::query(&format!("DROP TABLE IF EXISTS {collection}"))
        .execute(&pool)
        .await?;
    pool.close().await;

    result
}

/// Document-store app over a `PostgresBookStore` whose server never answers
pub async fn with_unreachable_postgres_app<F>(f: F) -> anyhow::Result<()>
where
    F: FnOnce(TestApp) -> TestFuture,
{
    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(500))
        .connect_lazy("postgres://bookshelf@127.0.0.1:1/book_db")?;
    let store = PostgresBookStore::new(pool, "books");

    with_docstore_app_over(Arc::new(store), |_| {}, f).await
}

pub fn book_json(publish_year: i32, author: &str, genre: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "publish_year": publish_year,
        "author": author,
        "genre": genre,
        "title": title,
    })
}

// ============================================================================
// Catalog
// ============================================================================

pub const CATALOG_HEADER: &str = "id,publish_year,author,genre,title\n";

/// Seed the catalog from `csv` written to a temporary `book.csv`
pub async fn with_catalog_app<F>(csv: &str, f: F) -> anyhow::Result<()>
where
    F: FnOnce(TestApp) -> TestFuture,
{
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("book.csv");
    let mut file = std::fs::File::create(&path)?;
    file.write_all(csv.as_bytes())?;
    drop(file);

    let mut config = Config::default();
    config.catalog.source_path = path.to_string_lossy().into_owned();

    let state = CatalogState::new(config);
    f(TestApp::new(create_catalog_router(state))).await
}

/// Catalog whose source file does not exist
pub async fn with_missing_catalog_source<F>(f: F) -> anyhow::Result<()>
where
    F: FnOnce(TestApp) -> TestFuture,
{
    let dir = tempfile::tempdir()?;

    let mut config = Config::default();
    config.catalog.source_path = dir.path().join("book.csv").to_string_lossy().into_owned();

    let state = CatalogState::new(config);
    f(TestApp::new(create_catalog_router(state))).await
}
