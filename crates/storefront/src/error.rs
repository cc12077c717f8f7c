//! Unified error handling.
//!
//! Provides a unified `AppError` type that logs server-side failures before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mini_shop_core::{IdError, SortKeyError};
use thiserror::Error;

use crate::contact::ContactError;
use crate::quiz::QuizError;
use crate::shop::ShopError;
use crate::todo::TodoError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Shop operation failed.
    #[error("{0}")]
    Shop(#[from] ShopError),

    /// Contact form was invalid.
    #[error("{0}")]
    Contact(#[from] ContactError),

    /// To-do operation failed.
    #[error("{0}")]
    Todo(#[from] TodoError),

    /// Quiz operation failed.
    #[error("{0}")]
    Quiz(#[from] QuizError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<IdError> for AppError {
    fn from(err: IdError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

/// Malformed or mistyped JSON bodies are validation failures like any other.
impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        Self::BadRequest(err.body_text())
    }
}

impl From<SortKeyError> for AppError {
    fn from(err: SortKeyError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Shop(err) => match err {
                ShopError::InvalidQuantity => StatusCode::BAD_REQUEST,
                ShopError::NotReviewing => StatusCode::CONFLICT,
                ShopError::ProductNotFound(_) => StatusCode::NOT_FOUND,
            },
            Self::Contact(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Todo(err) => match err {
                TodoError::EmptyTask => StatusCode::BAD_REQUEST,
                TodoError::NotFound(_) => StatusCode::NOT_FOUND,
            },
            Self::Quiz(err) => match err {
                QuizError::AnswerOutOfRange(_) => StatusCode::BAD_REQUEST,
                QuizError::AlreadyAnswered | QuizError::NotAnswered | QuizError::Finished => {
                    StatusCode::CONFLICT
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Don't expose internal error details to clients
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mini_shop_core::ProductId;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("missing field `id`".to_string());
        assert_eq!(err.to_string(), "Bad request: missing field `id`");

        let err = AppError::from(ContactError::MissingFields);
        assert_eq!(err.to_string(), "Please fill in all required fields.");

        let err = AppError::from(TodoError::EmptyTask);
        assert_eq!(err.to_string(), "Please enter a task!");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(QuizError::EmptyBank.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(ShopError::InvalidQuantity.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ShopError::NotReviewing.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(ShopError::ProductNotFound(ProductId::parse("p99").unwrap()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(QuizError::AlreadyAnswered.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(QuizError::AnswerOutOfRange(9).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(IdError::Empty.into()),
            StatusCode::BAD_REQUEST
        );
    }
}
