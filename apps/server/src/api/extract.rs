//! Custom request extractors

use crate::Error;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Catalog book id taken from the `{id}` path segment.
///
/// Non-integer, zero and negative ids are all rejected with 422 before any
/// lookup happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogBookId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for CatalogBookId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                let reason = rejection.body_text();
                Error::Validation(format!("Book id must be an integer: {}", reason)).into_response()
            })?;

        if id <= 0 {
            return Err(
                Error::Validation(format!("Book id must be greater than 0, got {}", id))
                    .into_response(),
            );
        }

        Ok(Self(id))
    }
}
