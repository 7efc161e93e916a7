//! Defines the app level error type and its conversion to failure envelopes.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::envelope::Envelope;

/// The message sent to the client in place of backend error details.
const INTERNAL_ERROR_MESSAGE: &str =
    "An unexpected error occurred, check the server logs for more details.";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client sent a request with missing or malformed input.
    ///
    /// The message describes what was wrong with the input and is safe to
    /// show to the client.
    #[error("{0}")]
    Validation(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The path exists but does not accept the request method.
    #[error("the request method is not allowed for this resource")]
    MethodNotAllowed,

    /// An unhandled/unexpected SQL error.
    ///
    /// The inner error should only be logged on the server. The client gets
    /// a generic message instead.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        Error::SqlError(value)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl Error {
    /// The HTTP status code the client receives for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            Error::Validation(message) => {
                tracing::debug!("Rejected request: {message}");
                message
            }
            Error::NotFound => "Not found.".to_owned(),
            Error::MethodNotAllowed => "Method not allowed.".to_owned(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                INTERNAL_ERROR_MESSAGE.to_owned()
            }
        };

        (status, Envelope::failure(message)).into_response()
    }
}
