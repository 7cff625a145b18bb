use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

/// The only failure clients see: a 500 whose plain-text body is the
/// underlying message.
///
/// Database messages are passed through verbatim. That leaks schema details
/// and must be revisited before exposing the service publicly.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", .0.message())]
    Store(#[from] StoreError),

    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    Path(#[from] PathRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
