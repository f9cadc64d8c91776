use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::AppError;

/// Numeric record id from the `{id}` path segment. Anything that is not an
/// `i32` is treated as a missing record.
pub struct RecordId(pub i32);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;

        raw.parse().map(Self).map_err(|_| AppError::NotFound)
    }
}
