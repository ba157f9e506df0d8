//! Inference error to HTTP error conversion implementation.

use axum::http::StatusCode;
use vlmgate_inference::ErrorKind as InferenceErrorKind;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for inference error conversions.
const TRACING_TARGET: &str = "vlmgate_server::handler::inference";

/// Prefix of the message returned when the inference host rejects a call.
pub const UPSTREAM_MESSAGE_PREFIX: &str = "Inference API error: ";

impl From<vlmgate_inference::Error> for HttpError<'static> {
    fn from(error: vlmgate_inference::Error) -> Self {
        match error.kind {
            InferenceErrorKind::Upstream => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    status = ?error.status,
                    error = %error,
                    "Inference endpoint rejected the request"
                );
            }
            InferenceErrorKind::InvalidInput => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Inference request rejected before sending"
                );
            }
            _ => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = %error.kind,
                    "Inference call failed"
                );
            }
        }

        let message = error.message_or_kind().to_owned();

        match error.kind {
            InferenceErrorKind::Upstream => {
                let kind = error
                    .status
                    .and_then(|status| StatusCode::from_u16(status).ok())
                    .filter(|status| status.is_client_error() || status.is_server_error())
                    .map_or(ErrorKind::BadGateway, ErrorKind::Upstream);

                kind.with_message(format!("{UPSTREAM_MESSAGE_PREFIX}{message}"))
                    .with_context(format!("upstream status: {:?}", error.status))
            }

            InferenceErrorKind::InvalidInput => ErrorKind::BadRequest.with_message(message),

            InferenceErrorKind::Timeout => ErrorKind::InternalServerError
                .with_message(message)
                .with_suggestion("Increase the inference timeout or check the model host load"),

            InferenceErrorKind::NetworkError => ErrorKind::InternalServerError
                .with_message(message)
                .with_suggestion("Check that the inference base URL is reachable"),

            _ => ErrorKind::InternalServerError.with_message(message),
        }
    }
}
