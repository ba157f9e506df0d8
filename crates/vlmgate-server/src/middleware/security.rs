//! Security middleware for HTTP request protection.
//!
//! CORS rules, a couple of static response headers and the request body
//! ceiling. Base64 page scans are large, so the ceiling defaults to 50 MiB
//! rather than axum's 2 MiB.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{self, HeaderName, HeaderValue};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use super::observability::REQUEST_ID_HEADER;

/// Default request body ceiling: 50 MiB.
pub const DEFAULT_MAX_BODY_SIZE: usize = 50 * 1024 * 1024;

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S> {
    /// Layers security middlewares with the provided configurations.
    ///
    /// This middleware stack applies CORS rules, `nosniff`/`DENY` response
    /// headers and request body size limits.
    fn with_security(self, cors: &CorsConfig, body_limit: &BodyLimitConfig) -> Self;

    /// Layers security middlewares with default configurations.
    ///
    /// Uses development-friendly CORS settings.
    fn with_default_security(self) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, cors: &CorsConfig, body_limit: &BodyLimitConfig) -> Self {
        let cors_layer = CorsLayer::new()
            .allow_origin(cors.to_header_values())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
            .allow_credentials(cors.allow_credentials)
            .max_age(cors.max_age());

        self.layer(DefaultBodyLimit::max(body_limit.max_body_size))
            .layer(RequestBodyLimitLayer::new(body_limit.max_body_size))
            .layer(cors_layer)
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
    }

    fn with_default_security(self) -> Self {
        self.with_security(&CorsConfig::default(), &BodyLimitConfig::default())
    }
}

/// Request body size configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct BodyLimitConfig {
    /// Maximum request body size in bytes.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "MAX_BODY_SIZE", default_value_t = DEFAULT_MAX_BODY_SIZE)
    )]
    pub max_body_size: usize,
}

impl Default for BodyLimitConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl BodyLimitConfig {
    /// Creates a configuration with the given ceiling in bytes.
    pub fn new(max_body_size: usize) -> Self {
        Self { max_body_size }
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
///
/// Controls which origins can access your API and what HTTP methods
/// and headers are allowed in cross-origin requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// List of allowed CORS origins.
    ///
    /// If empty, defaults to localhost origins for development.
    #[cfg_attr(
        feature = "config",
        arg(long = "cors-origins", env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// Maximum age for CORS preflight requests in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "cors-max-age", env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,

    /// Whether to allow credentials in CORS requests.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "cors-allow-credentials",
            env = "CORS_ALLOW_CREDENTIALS",
            default_value = "true",
            action = clap::ArgAction::Set
        )
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    /// Returns the CORS max age as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Converts configured origins to HeaderValue list, falling back to localhost for development.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.is_empty() {
            vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://localhost:8080"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
                HeaderValue::from_static("http://127.0.0.1:8080"),
                HeaderValue::from_static("http://localhost:5173"),
            ]
        } else {
            self.allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum_test::TestServer;
    use serde_json::json;

    use super::*;
    use crate::extract::Json;

    async fn echo_len(Json(body): Json<serde_json::Value>) -> String {
        body.to_string().len().to_string()
    }

    fn app(limit: usize) -> Router {
        Router::new()
            .route("/echo", post(echo_len))
            .with_security(&CorsConfig::default(), &BodyLimitConfig::new(limit))
    }

    #[tokio::test]
    async fn body_under_limit_is_accepted() -> anyhow::Result<()> {
        let server = TestServer::new(app(1024))?;

        server
            .post("/echo")
            .json(&json!({ "base64Image": "AAAA" }))
            .await
            .assert_status_ok();
        Ok(())
    }

    #[tokio::test]
    async fn body_over_limit_is_rejected() -> anyhow::Result<()> {
        let server = TestServer::new(app(64))?;

        let response = server
            .post("/echo")
            .json(&json!({ "base64Image": "A".repeat(1024) }))
            .await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        Ok(())
    }

    #[tokio::test]
    async fn default_limit_accepts_large_images() -> anyhow::Result<()> {
        let server = TestServer::new(app(DEFAULT_MAX_BODY_SIZE))?;

        // Larger than axum's built-in 2 MiB default.
        server
            .post("/echo")
            .json(&json!({ "base64Image": "A".repeat(3 * 1024 * 1024) }))
            .await
            .assert_status_ok();
        Ok(())
    }

    #[tokio::test]
    async fn security_headers_are_set() -> anyhow::Result<()> {
        let server = TestServer::new(app(1024))?;

        let response = server.post("/echo").json(&json!({})).await;
        assert_eq!(response.header(header::X_CONTENT_TYPE_OPTIONS), "nosniff");
        assert_eq!(response.header(header::X_FRAME_OPTIONS), "DENY");
        Ok(())
    }

    #[test]
    fn cors_defaults_to_localhost() {
        let origins = CorsConfig::default().to_header_values();
        assert!(origins.contains(&HeaderValue::from_static("http://localhost:3000")));
    }

    #[test]
    fn cors_skips_invalid_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.example.com".into(), "bad\norigin".into()],
            ..CorsConfig::default()
        };
        assert_eq!(config.to_header_values().len(), 1);
    }
}
