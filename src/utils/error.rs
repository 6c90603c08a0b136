use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::models::Envelope;

/// Failure of a resource handler, already classified by HTTP outcome.
///
/// The wrapped text is what ends up in the envelope's `data` field, so it is
/// surfaced to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Malformed or incomplete request body.
    Validation(String),
    /// Anything the document store reported, timeouts included.
    Database(String),
    NotFound(String),
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg) | AppError::Database(msg) | AppError::NotFound(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for AppError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        Envelope::error(self.status_code(), self.message()).into_response()
    }
}
