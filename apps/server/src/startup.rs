//! Startup data loading
//!
//! The catalog service is seeded once from a CSV file with the header
//! `id,publish_year,author,genre,title`. Loading tolerates bad data: a row whose
//! id or publish year is not an integer, that is missing columns, or that repeats
//! an id already loaded is skipped with a warning and the load carries on. A
//! missing file yields an empty catalog.

use crate::models::{BookFields, CatalogBook};
use serde::Deserialize;
use std::{collections::HashSet, fs::File, io, path::Path};

/// One raw CSV row before coercion
#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    publish_year: String,
    author: String,
    genre: String,
    title: String,
}

impl CatalogRow {
    fn into_book(self) -> Result<CatalogBook, String> {
        let id = self
            .id
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("invalid id '{}': {}", self.id, e))?;
        let publish_year = self
            .publish_year
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid publish_year '{}': {}", self.publish_year, e))?;

        Ok(CatalogBook::new(
            id,
            BookFields {
                publish_year,
                author: self.author.trim().to_string(),
                genre: self.genre.trim().to_string(),
                title: self.title.trim().to_string(),
            },
        ))
    }
}

/// Load the catalog source file. Never fails.
pub fn load_catalog(path: &Path) -> Vec<CatalogBook> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(
                path = %path.display(),
                "Catalog source not found, starting with an empty catalog"
            );
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Catalog source unreadable, starting with an empty catalog"
            );
            return Vec::new();
        }
    };

    let books = read_catalog(file);
    tracing::info!(path = %path.display(), books = books.len(), "Catalog loaded");
    books
}

/// Parse catalog rows from any CSV reader, skipping rows that cannot be coerced
pub fn read_catalog<R: io::Read>(source: R) -> Vec<CatalogBook> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        // Columns past the header are ignored; short rows fail to deserialize
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            tracing::warn!(error = %e, "Catalog header unreadable, starting with an empty catalog");
            return Vec::new();
        }
    };

    let mut books = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                    tracing::warn!(error = %e, "Catalog read aborted");
                    break;
                }
                tracing::warn!(error = %e, "Skipping malformed catalog row");
                skipped += 1;
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let book = record
            .deserialize::<CatalogRow>(Some(&headers))
            .map_err(|e| e.to_string())
            .and_then(CatalogRow::into_book);

        match book {
            Ok(book) if !seen.insert(book.id) => {
                tracing::warn!(line, id = book.id, "Skipping catalog row with duplicate id");
                skipped += 1;
            }
            Ok(book) => books.push(book),
            Err(reason) => {
                tracing::warn!(line, row = ?record, %reason, "Skipping catalog row");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, loaded = books.len(), "Some catalog rows were skipped");
    }

    books
}
