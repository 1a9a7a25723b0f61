use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::error::ApiError;

/// `axum::Json` whose rejection is an `ApiError`, so unreadable bodies get
/// the same 400 JSON shape as validation failures.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    }
}
