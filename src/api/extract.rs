//! Request extractors.

use axum::extract::FromRequest;

use super::error::ApiErrorResponse;

/// JSON body extractor whose rejections answer `400 {"error": ...}`.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiErrorResponse))]
pub struct JsonBody<T>(pub T);
