use axum::response::{IntoResponse, Response};

use super::error::AppError;
use super::submit::HOME;
use crate::views::{Empty, Page};

/// GET /
pub async fn index() -> Response {
    Page::new(HOME, Empty::default()).into_response()
}

/// Any route without a handler.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
