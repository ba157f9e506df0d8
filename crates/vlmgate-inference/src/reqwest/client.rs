//! Reqwest-based HTTP client for chat completions.

use std::sync::Arc;

use reqwest::Client;
use url::Url;

use super::{Error, ReqwestConfig, TRACING_TARGET};
use crate::{ChatCompletionRequest, Completion, InferenceProvider, InferenceService};

/// Inner client that holds the HTTP client and configuration.
struct ReqwestClientInner {
    http: Client,
    config: ReqwestConfig,
    completions_url: Url,
}

/// Reqwest-based HTTP client for OpenAI-compatible inference hosts.
///
/// Each call is a single POST to `{base_url}/chat/completions`. Nothing is
/// retried and the response is never streamed.
///
/// # Examples
///
/// ```rust,ignore
/// use vlmgate_inference::reqwest::{ReqwestClient, ReqwestConfig};
///
/// let client = ReqwestClient::new(ReqwestConfig::default())?;
/// let completion = client.complete(&request).await?;
/// ```
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new reqwest client with the given configuration.
    pub fn new(config: ReqwestConfig) -> crate::Result<Self> {
        config.validate()?;
        let completions_url = config.completions_url()?;
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            url = %completions_url,
            timeout_secs = ?config.timeout_secs,
            "Creating reqwest client"
        );

        let mut builder = Client::builder().user_agent(&user_agent);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(|e| {
            crate::Error::configuration()
                .with_message("Failed to create HTTP client")
                .with_source(e)
        })?;

        let inner = ReqwestClientInner {
            http,
            config,
            completions_url,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Gets the resolved chat completions URL.
    pub fn completions_url(&self) -> &Url {
        &self.inner.completions_url
    }

    /// Converts this client into an [`InferenceService`] for use with dependency injection.
    pub fn into_service(self) -> InferenceService {
        InferenceService::new(self)
    }
}

#[async_trait::async_trait]
impl InferenceProvider for ReqwestClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> crate::Result<Completion> {
        let url = self.completions_url();

        tracing::info!(
            target: TRACING_TARGET,
            url = %url,
            model = %request.model,
            message_count = request.message_count(),
            keys = ?["model", "messages", "temperature", "max_tokens"],
            "Calling inference endpoint"
        );

        let http_response = self
            .http()
            .post(url.clone())
            .json(request)
            .send()
            .await
            .map_err(Error::from)?;

        let status = http_response.status();
        tracing::info!(
            target: TRACING_TARGET,
            status = status.as_u16(),
            reason = status.canonical_reason().unwrap_or_default(),
            "Inference endpoint responded"
        );

        if !status.is_success() {
            let body = http_response.text().await.map_err(Error::from)?;
            tracing::error!(
                target: TRACING_TARGET,
                status = status.as_u16(),
                body = %body,
                "Inference endpoint returned an error"
            );
            return Err(crate::Error::upstream(status.as_u16(), body));
        }

        let body = http_response.bytes().await.map_err(Error::from)?;
        let completion = Completion::from_bytes(body)?;

        tracing::debug!(
            target: TRACING_TARGET,
            keys = ?completion.keys(),
            choices = ?completion.choices(),
            "Inference response parsed"
        );

        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::{ErrorKind, ImageData};

    const COMPLETION: &str = r#"{"id":"chatcmpl-1","object":"chat.completion","choices":[{"index":0,"message":{"role":"assistant","content":"{\"products\":[]}"}}]}"#;

    fn vision_request() -> ChatCompletionRequest {
        let image = ImageData::new("AAAA").unwrap();
        ChatCompletionRequest::vision("qwen-vl", "Count the items.", &image)
    }

    fn client_for(server: &mockito::ServerGuard) -> ReqwestClient {
        ReqwestClient::new(ReqwestConfig::new(format!("{}/v1", server.url()))).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = ReqwestClient::new(ReqwestConfig::default()).unwrap();
        assert!(client.config().user_agent.is_none());
        assert!(client.completions_url().as_str().ends_with("/v1/chat/completions"));
    }

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let error = ReqwestClient::new(ReqwestConfig::new("::nope")).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_complete_posts_request_and_relays_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "model": "qwen-vl",
                "max_tokens": 2048,
                "messages": [{
                    "role": "user",
                    "content": [
                        { "type": "text", "text": "Count the items." },
                        { "type": "image_url", "image_url": { "url": "data:image/png;base64,AAAA" } }
                    ]
                }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(COMPLETION)
            .expect(1)
            .create_async()
            .await;

        let completion = client_for(&server).complete(&vision_request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(completion.as_bytes().as_ref(), COMPLETION.as_bytes());
        assert_eq!(completion.choices(), Some(1));
    }

    #[tokio::test]
    async fn test_complete_maps_error_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(503)
            .with_body("model unloaded")
            .create_async()
            .await;

        let error = client_for(&server)
            .complete(&vision_request())
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert_eq!(error.kind, ErrorKind::Upstream);
        assert_eq!(error.status, Some(503));
        assert_eq!(error.message.as_deref(), Some("model unloaded"));
    }

    #[tokio::test]
    async fn test_complete_rejects_non_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body("<html>proxy page</html>")
            .create_async()
            .await;

        let error = client_for(&server)
            .complete(&vision_request())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn test_complete_connection_failure() {
        // Port 9 (discard) is closed on test hosts.
        let client = ReqwestClient::new(ReqwestConfig::new("http://127.0.0.1:9/v1")).unwrap();

        let error = client.complete(&vision_request()).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::NetworkError);
        assert!(error.message.is_some());
    }
}
