/// Request extractors with API error rejections
///
/// Thin wrappers over axum's `Path`, `Query` and `Json` that reject with
/// [`ApiError`] instead of axum's plain-text rejections, so a non-integer
/// id, an unparsable query string or an ill-typed body all come back as a
/// 422 JSON error before any handler code runs.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
