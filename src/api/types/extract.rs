//! Path and query extractors that report rejections in the API error format

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::FromRequestParts;

use super::error::{ApiError, ApiErrorType};

/// `axum::extract::Path` with an [`ApiError`] rejection
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

/// `axum::extract::Query` with an [`ApiError`] rejection
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(
            rejection.status(),
            ApiErrorType::InvalidRequestError,
            format!("Invalid path: {}", rejection.body_text()),
        )
        .with_param("id")
    }
}

// `password` is the only query parameter the API reads
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(format!("Invalid query string: {}", rejection.body_text()))
            .with_param("password")
    }
}
