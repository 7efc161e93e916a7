//! The uniform `{ok, results}` wrapper for every JSON response.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Wraps a response payload together with a flag saying whether the request succeeded.
///
/// On success `results` holds the payload, or is omitted entirely for
/// operations that have nothing to return. On failure it holds a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the request succeeded.
    pub ok: bool,
    /// The payload or error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<T>,
}

impl<T> Envelope<T> {
    /// A successful response carrying `results`.
    pub fn success(results: T) -> Self {
        Self {
            ok: true,
            results: Some(results),
        }
    }
}

impl Envelope<()> {
    /// A successful response with no payload, serialized as `{"ok": true}`.
    pub fn empty() -> Self {
        Self {
            ok: true,
            results: None,
        }
    }
}

impl Envelope<String> {
    /// A failed response carrying a message for the client.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            results: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
