//! Inference service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::{ChatCompletionRequest, Completion, InferenceProvider, Result, TRACING_TARGET};

/// Inference service wrapper with observability.
///
/// This wrapper adds structured logging to any [`InferenceProvider`].
/// The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct InferenceService {
    inner: Arc<dyn InferenceProvider>,
}

impl fmt::Debug for InferenceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceService").finish_non_exhaustive()
    }
}

impl InferenceService {
    /// Create a new inference service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: InferenceProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Sends a chat completion request through the wrapped provider.
    pub async fn complete(&self, request: &ChatCompletionRequest) -> Result<Completion> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            model = %request.model,
            message_count = request.message_count(),
            max_tokens = request.max_tokens,
            "Requesting chat completion"
        );

        let result = self.inner.complete(request).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(completion) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    model = %request.model,
                    keys = ?completion.keys(),
                    choices = ?completion.choices(),
                    elapsed_ms = elapsed.as_millis(),
                    "Chat completion received"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    model = %request.model,
                    kind = %error.kind,
                    status = ?error.status,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Chat completion failed"
                );
            }
        }

        result
    }
}
