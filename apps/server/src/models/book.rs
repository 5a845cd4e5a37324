use serde::{Deserialize, Serialize};

/// Mutable fields of a book record.
///
/// Used as the create payload and as the document body stored in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    pub publish_year: i32,
    pub author: String,
    pub genre: String,
    pub title: String,
}

/// A book record with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book<Id> {
    pub id: Id,
    #[serde(flatten)]
    pub fields: BookFields,
}

/// Book held in the document collection; the store-assigned id is surfaced as a string.
pub type StoredBook = Book<String>;

/// Book held in the in-memory catalog; the id comes from the source file.
pub type CatalogBook = Book<i64>;

impl<Id> Book<Id> {
    pub fn new(id: Id, fields: BookFields) -> Self {
        Self { id, fields }
    }
}

/// Partial update payload.
///
/// Absent and `null` fields both mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.publish_year.is_none()
            && self.author.is_none()
            && self.genre.is_none()
            && self.title.is_none()
    }

    /// Overwrite the provided fields in place.
    pub fn apply(&self, fields: &mut BookFields) {
        if let Some(year) = self.publish_year {
            fields.publish_year = year;
        }
        if let Some(author) = &self.author {
            fields.author = author.clone();
        }
        if let Some(genre) = &self.genre {
            fields.genre = genre.clone();
        }
        if let Some(title) = &self.title {
            fields.title = title.clone();
        }
    }
}
