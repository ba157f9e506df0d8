//! Inference provider configuration.

use anyhow::Context;
use vlmgate_inference::InferenceService;
use vlmgate_inference::reqwest::{ReqwestClient, ReqwestConfig};

/// Creates the inference service backed by the reqwest client.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the HTTP client cannot be built.
pub fn create_inference_service(config: &ReqwestConfig) -> anyhow::Result<InferenceService> {
    let client =
        ReqwestClient::new(config.clone()).context("failed to create reqwest inference client")?;
    Ok(client.into_service())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_service_for_default_endpoint() {
        assert!(create_inference_service(&ReqwestConfig::default()).is_ok());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let config = ReqwestConfig::new("ftp://10.0.0.5/v1");
        assert!(create_inference_service(&config).is_err());
    }
}
