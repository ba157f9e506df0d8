//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod documents;
mod error;
mod monitors;
pub mod request;
pub mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for the fallback handler.
const TRACING_TARGET: &str = "vlmgate_server::handler";

#[inline]
async fn handler(uri: axum::http::Uri) -> Response {
    tracing::debug!(target: TRACING_TARGET, path = %uri.path(), "No route matched");
    ErrorKind::NotFound.into_response()
}

#[inline]
async fn method_not_allowed() -> Response {
    ErrorKind::MethodNotAllowed.into_response()
}

/// Returns a [`Router`] with all routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(documents::routes())
        .merge(monitors::routes())
        .fallback(handler)
        .method_not_allowed_fallback(method_not_allowed)
}
