use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::constants::*;
use crate::views;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Session signing failed")]
    SessionSigning,

    #[error("{}", ERR_MISSING_FIELDS)]
    MissingFields,

    #[error("{}", ERR_USER_EXISTS)]
    UserAlreadyExists,

    #[error("{}", ERR_INVALID_CREDENTIALS)]
    InvalidCredentials,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("{}", ERR_ENTRY_NOT_FOUND)]
    EntryNotFound,

    #[error("{}", ERR_RATE_UNAVAILABLE)]
    ExchangeRateUnavailable,

    #[error("{0}")]
    InvalidInput(String),
}

impl AppError {
    /// Failures of the server itself rather than of the user's input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::Io(_)
                | AppError::Csv(_)
                | AppError::Json(_)
                | AppError::TaskJoin(_)
                | AppError::SessionSigning
        )
    }

    /// Status code and the message shown to the user
    pub fn status_and_message(&self) -> (StatusCode, &str) {
        match self {
            AppError::Io(e) => {
                tracing::error!("I/O error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Csv(e) => {
                tracing::error!("CSV error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Json(e) => {
                tracing::error!("JSON error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::TaskJoin(e) => {
                tracing::error!("Task join error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::SessionSigning => {
                tracing::error!("Failed to sign session cookie");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::NotLoggedIn => (StatusCode::UNAUTHORIZED, "Not logged in"),
            AppError::MissingFields => (StatusCode::BAD_REQUEST, ERR_MISSING_FIELDS),
            AppError::UserAlreadyExists => (StatusCode::CONFLICT, ERR_USER_EXISTS),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, ERR_INVALID_CREDENTIALS),
            AppError::EntryNotFound => (StatusCode::NOT_FOUND, ERR_ENTRY_NOT_FOUND),
            AppError::ExchangeRateUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, ERR_RATE_UNAVAILABLE)
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
        }
    }
}

/// Implement IntoResponse to render AppError as an HTML page
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Protected pages send anonymous visitors back to the login screen
        if matches!(self, AppError::NotLoggedIn) {
            return Redirect::to("/").into_response();
        }

        let (status, error_message) = self.status_and_message();
        (status, Html(views::error_page(error_message))).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
