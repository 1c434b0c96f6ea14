use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::views;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage query failed: {0}")]
    Query(String),
}

impl StorageError {
    /// Classifies a sqlx error. Unique violations on insert are reported by the
    /// caller as [`StorageError::Conflict`] since only it knows the key.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        let message = err.to_string();
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Configuration(_) => StorageError::Unavailable(message),
            _ => StorageError::Query(message),
        }
    }
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("could not allocate a unique short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            AppError::CodeSpaceExhausted { .. } | AppError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message that is safe to show to the submitter.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::InvalidUrl(_) => "Invalid URL. Please enter a valid URL.",
            AppError::CodeSpaceExhausted { .. } | AppError::Storage(_) => {
                "An unexpected error occurred. Please try again later."
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, views::error_page(status, self.public_message())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_failures_are_unavailable() {
        assert!(matches!(
            StorageError::from_sqlx(sqlx::Error::PoolTimedOut),
            StorageError::Unavailable(_)
        ));
        assert!(matches!(
            StorageError::from_sqlx(sqlx::Error::PoolClosed),
            StorageError::Unavailable(_)
        ));
    }

    #[test]
    fn other_failures_are_query_errors() {
        assert!(matches!(
            StorageError::from_sqlx(sqlx::Error::RowNotFound),
            StorageError::Query(_)
        ));
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::InvalidUrl("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::CodeSpaceExhausted { attempts: 5 }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(StorageError::Unavailable("down".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn server_errors_do_not_leak_details() {
        let err = AppError::from(StorageError::Query("SELECT secret".into()));
        assert!(!err.public_message().contains("secret"));
    }
}
