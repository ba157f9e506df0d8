#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod service;

pub mod request;
pub mod response;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use request::{ChatCompletionRequest, ChatMessage, ContentPart, ImageData, ImageUrl, Role};
pub use response::Completion;
pub use service::InferenceService;

/// Tracing target for inference operations.
pub const TRACING_TARGET: &str = "vlmgate_inference";

/// Core trait for chat completion providers.
///
/// Implement this trait to plug a model host into [`InferenceService`].
#[async_trait::async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Sends a single chat completion request and waits for the whole response.
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<Completion>;
}
