//! Mock inference provider for testing.
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! vlmgate-inference = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use vlmgate_inference::mock::MockProvider;
//!
//! let provider = MockProvider::upstream_error(503, "model unloaded");
//! let service = provider.clone().into_service();
//! // ... exercise the service ...
//! assert_eq!(provider.call_count(), 1);
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;

use crate::{ChatCompletionRequest, Completion, Error, InferenceProvider, InferenceService, Result};

/// Default body returned by [`MockProvider::default`].
pub const MOCK_COMPLETION: &str = r#"{"id":"chatcmpl-mock","object":"chat.completion","choices":[{"index":0,"message":{"role":"assistant","content":"{}"},"finish_reason":"stop"}]}"#;

/// Canned outcome returned for every request.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Responds with the given body, parsed like a real endpoint response.
    Success(Bytes),
    /// Fails as if the endpoint answered with a non-success status.
    Upstream { status: u16, body: String },
    /// Fails as if the endpoint could not be reached.
    Network(String),
}

/// Mock provider that records every request it receives.
///
/// Clones share the same recording, so a clone can be kept for assertions
/// after the original has been moved into an [`InferenceService`].
#[derive(Clone, Debug)]
pub struct MockProvider {
    outcome: Arc<MockOutcome>,
    requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::success(MOCK_COMPLETION)
    }
}

impl MockProvider {
    /// Creates a new mock provider with the given outcome.
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome: Arc::new(outcome),
            requests: Arc::default(),
        }
    }

    /// Creates a provider that answers with the given JSON body.
    pub fn success(body: impl Into<Bytes>) -> Self {
        Self::new(MockOutcome::Success(body.into()))
    }

    /// Creates a provider that fails with an upstream status and body.
    pub fn upstream_error(status: u16, body: impl Into<String>) -> Self {
        Self::new(MockOutcome::Upstream {
            status,
            body: body.into(),
        })
    }

    /// Creates a provider that fails with a network error.
    pub fn network_error(message: impl Into<String>) -> Self {
        Self::new(MockOutcome::Network(message.into()))
    }

    /// Returns every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Converts this provider into an [`InferenceService`].
    pub fn into_service(self) -> InferenceService {
        InferenceService::new(self)
    }
}

#[async_trait::async_trait]
impl InferenceProvider for MockProvider {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<Completion> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        match self.outcome.as_ref() {
            MockOutcome::Success(body) => Completion::from_bytes(body.clone()),
            MockOutcome::Upstream { status, body } => Err(Error::upstream(*status, body.clone())),
            MockOutcome::Network(message) => {
                Err(Error::network_error().with_message(message.clone()))
            }
        }
    }
}
