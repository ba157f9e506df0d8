//! Document task handlers.
//!
//! Both task routes share [`forward`]: the task selects the instruction and
//! the model, everything else is identical. The image is never decoded; it is
//! re-embedded in a `data:image/png;base64,` URI and relayed with one POST.

use axum::Router;
use axum::extract::State;
use axum::routing::{MethodRouter, post};
use vlmgate_inference::{ChatCompletionRequest, InferenceService};

use super::request::DocumentPayload;
use super::response::CompletionResponse;
use crate::extract::Json;
use crate::handler::Result;
use crate::service::{ServiceConfig, ServiceState, Task};

/// Tracing target for document task operations.
const TRACING_TARGET: &str = "vlmgate_server::handler::documents";

/// Builds the chat completion for `task` and relays the inference host's answer.
#[tracing::instrument(skip_all, fields(task = %task))]
async fn forward(
    task: Task,
    inference: &InferenceService,
    config: &ServiceConfig,
    payload: DocumentPayload,
) -> Result<CompletionResponse> {
    tracing::info!(
        target: TRACING_TARGET,
        image_len = payload.image_len(),
        file_type = ?payload.file_type,
        "Document received"
    );

    let image = payload.into_image().inspect_err(|error| {
        tracing::warn!(target: TRACING_TARGET, error = %error, "Rejected document without image");
    })?;

    let model = config.model_for(task);
    let request = ChatCompletionRequest::vision(model, task.instruction(), &image);

    tracing::debug!(
        target: TRACING_TARGET,
        model = %request.model,
        message_count = request.message_count(),
        "Chat completion request built"
    );

    let completion = inference.complete(&request).await?;

    tracing::info!(
        target: TRACING_TARGET,
        keys = ?completion.keys(),
        choices = ?completion.choices(),
        "Relaying completion"
    );

    Ok(CompletionResponse::from(completion))
}

/// Returns the `POST` route serving `task`.
fn task_route(task: Task) -> MethodRouter<ServiceState> {
    post(
        move |State(inference): State<InferenceService>,
              State(config): State<ServiceConfig>,
              Json(payload): Json<DocumentPayload>| async move {
            forward(task, &inference, &config, payload).await
        },
    )
}

/// Returns a [`Router`] with all document task routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route(Task::Ocr.path(), task_route(Task::Ocr))
        .route(Task::Counting.path(), task_route(Task::Counting))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::http::header::CONTENT_TYPE;
    use serde_json::{Value, json};
    use vlmgate_inference::mock::MockProvider;

    use super::*;
    use crate::handler::test::create_test_server_with_provider;
    use crate::service::{COUNTING_INSTRUCTION, OCR_INSTRUCTION};

    const COMPLETION: &str = "{\"id\": \"chatcmpl-7\",  \"choices\": [{\"index\": 0, \"message\": {\"role\": \"assistant\", \"content\": \"{\\\"products\\\": []}\"}}]}";

    #[tokio::test]
    async fn missing_image_is_rejected_without_calling_inference() -> anyhow::Result<()> {
        let provider = MockProvider::default();
        let server = create_test_server_with_provider(provider.clone(), ServiceConfig::default())?;

        for task in [Task::Ocr, Task::Counting] {
            for body in [json!({}), json!({ "base64Image": null }), json!({ "base64Image": "" })] {
                let response = server.post(task.path()).json(&body).await;
                response.assert_status_bad_request();

                let error = response.json::<Value>();
                assert_eq!(error["message"], "base64Image is required");
                assert_eq!(error["statusCode"], 400);
            }
        }

        assert_eq!(provider.call_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn ocr_request_embeds_png_data_uri() -> anyhow::Result<()> {
        let provider = MockProvider::default();
        let server = create_test_server_with_provider(provider.clone(), ServiceConfig::default())?;

        server
            .post("/api/ocr")
            .json(&json!({ "base64Image": "AAAA", "fileType": "pdf" }))
            .await
            .assert_status_ok();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);

        let request = &requests[0];
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.max_tokens, 2048);
        assert_eq!(request.messages.len(), 1);

        let content = &request.messages[0].content;
        assert_eq!(content[0].as_text(), Some(OCR_INSTRUCTION));
        assert_eq!(content[1].as_image_url(), Some("data:image/png;base64,AAAA"));
        Ok(())
    }

    #[tokio::test]
    async fn counting_uses_counting_instruction_and_model() -> anyhow::Result<()> {
        let provider = MockProvider::default();
        let config = ServiceConfig::new("default-vlm").with_task_model(Task::Counting, "qwen3-vl");
        let server = create_test_server_with_provider(provider.clone(), config)?;

        server
            .post("/api/counting")
            .json(&json!({ "base64Image": "iVBORw0KGgo" }))
            .await
            .assert_status_ok();
        server
            .post("/api/ocr")
            .json(&json!({ "base64Image": "iVBORw0KGgo" }))
            .await
            .assert_status_ok();

        let requests = provider.requests();
        assert_eq!(requests[0].model, "qwen3-vl");
        assert_eq!(
            requests[0].messages[0].content[0].as_text(),
            Some(COUNTING_INSTRUCTION)
        );
        assert_eq!(requests[1].model, "default-vlm");
        Ok(())
    }

    #[tokio::test]
    async fn completion_is_relayed_byte_for_byte() -> anyhow::Result<()> {
        let provider = MockProvider::success(COMPLETION);
        let server = create_test_server_with_provider(provider, ServiceConfig::default())?;

        let response = server
            .post("/api/counting")
            .json(&json!({ "base64Image": "AAAA" }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(CONTENT_TYPE), "application/json");
        assert_eq!(response.as_bytes().as_ref(), COMPLETION.as_bytes());
        Ok(())
    }

    #[tokio::test]
    async fn upstream_status_is_mirrored() -> anyhow::Result<()> {
        let provider = MockProvider::upstream_error(503, "model unloaded");
        let server = create_test_server_with_provider(provider, ServiceConfig::default())?;

        let response = server
            .post("/api/ocr")
            .json(&json!({ "base64Image": "AAAA" }))
            .await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let error = response.json::<Value>();
        assert_eq!(error["statusCode"], 503);
        assert!(
            error["message"]
                .as_str()
                .is_some_and(|message| message.contains("model unloaded"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn network_failure_is_internal_error() -> anyhow::Result<()> {
        let provider = MockProvider::network_error("error sending request: connection refused");
        let server = create_test_server_with_provider(provider, ServiceConfig::default())?;

        let response = server
            .post("/api/counting")
            .json(&json!({ "base64Image": "AAAA" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>()["message"],
            "error sending request: connection refused"
        );
        Ok(())
    }

    #[tokio::test]
    async fn non_json_completion_is_internal_error() -> anyhow::Result<()> {
        let provider = MockProvider::success("<html>gateway</html>");
        let server = create_test_server_with_provider(provider, ServiceConfig::default())?;

        server
            .post("/api/ocr")
            .json(&json!({ "base64Image": "AAAA" }))
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        Ok(())
    }

    #[tokio::test]
    async fn identical_payloads_produce_identical_requests() -> anyhow::Result<()> {
        let provider = MockProvider::default();
        let server = create_test_server_with_provider(provider.clone(), ServiceConfig::default())?;
        let body = json!({ "base64Image": "AAAA", "fileType": "jpeg" });

        server.post("/api/ocr").json(&body).await.assert_status_ok();
        server.post("/api/ocr").json(&body).await.assert_status_ok();

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() -> anyhow::Result<()> {
        let provider = MockProvider::default();
        let server = create_test_server_with_provider(provider.clone(), ServiceConfig::default())?;

        server
            .post("/api/ocr")
            .text("{\"base64Image\": ")
            .content_type("application/json")
            .await
            .assert_status_bad_request();

        server
            .post("/api/ocr")
            .json(&json!({ "base64Image": 42 }))
            .await
            .assert_status_bad_request();

        assert_eq!(provider.call_count(), 0);
        Ok(())
    }
}
