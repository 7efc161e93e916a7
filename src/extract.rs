//! Extractors that report rejected input as [Error::Validation] failure envelopes.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path},
};

use crate::Error;

/// Like [Json], but a malformed body is answered with a failure envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

/// Like [Path], but a malformed path segment is answered with a failure envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(Error))]
pub struct PathParams<T>(pub T);
