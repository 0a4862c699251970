//! Request extractors whose rejections render as `ReviewError`, so malformed
//! bodies, paths and query strings carry the same JSON error shape as every
//! other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::features::review::ReviewError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ReviewError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ReviewError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ReviewError))]
pub struct ApiQuery<T>(pub T);
