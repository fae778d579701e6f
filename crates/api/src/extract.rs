//! Extractors whose rejections use the API error body.
//!
//! axum's own `Path` and `Json` reject with plain-text responses; these
//! wrappers route the same failures through [`ApiError`].

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// `Path` extractor rejecting with `INVALID_GROUP_ID`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// `Json` extractor rejecting with `INVALID_BODY`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
