use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use encore_db::repo::StoreError;
use thiserror::Error;

use crate::views::{Empty, Page};

/// Failures of read handlers, rendered as the dedicated error pages.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let template = if status == StatusCode::NOT_FOUND {
            tracing::debug!(error = %self, "not found");
            "errors/404.html"
        } else {
            tracing::error!(error = %self, "request failed");
            "errors/500.html"
        };
        Page::new(template, Empty::default())
            .with_status(status)
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(StoreError::NotFound { entity: "venue", id: 3 }).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(StoreError::Persistence(DbErr::Custom("boom".into()))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
