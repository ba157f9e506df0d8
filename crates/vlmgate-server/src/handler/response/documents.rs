//! Document task response types.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use vlmgate_inference::Completion;

/// Chat completion relayed to the caller exactly as the inference host sent it.
#[must_use]
#[derive(Debug, Clone)]
pub struct CompletionResponse(pub Completion);

impl IntoResponse for CompletionResponse {
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, "application/json")],
            self.0.into_bytes(),
        )
            .into_response()
    }
}

impl From<Completion> for CompletionResponse {
    #[inline]
    fn from(completion: Completion) -> Self {
        Self(completion)
    }
}
