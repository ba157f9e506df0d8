//! Middleware configuration for the HTTP server.
//!
//! All middleware configs are re-exported from `vlmgate-server` and support
//! both CLI arguments and environment variables.
//!
//! # Example
//!
//! ```bash
//! vlmgate --cors-origins "https://app.example.com" --request-timeout 120
//! ```

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;
use serde::{Deserialize, Serialize};
use vlmgate_server::middleware::{BodyLimitConfig, CorsConfig, RecoveryConfig};

use super::TRACING_TARGET_CONFIG;

/// Upper bound for the per-request timeout in seconds.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;

/// Middleware configuration combining CORS, recovery and body limit settings.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// CORS (Cross-Origin Resource Sharing) configuration.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Recovery middleware configuration.
    ///
    /// Controls request timeout and panic recovery behavior.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,

    /// Request body size ceiling.
    #[clap(flatten)]
    pub body_limit: BodyLimitConfig,
}

impl MiddlewareConfig {
    /// Validates the timeout and body size settings.
    pub fn validate(&self) -> AnyhowResult<()> {
        let timeout = self.recovery.request_timeout;
        if timeout == 0 || timeout > MAX_REQUEST_TIMEOUT_SECS {
            return Err(anyhow!(
                "Request timeout {timeout} seconds is invalid. Must be between 1 and {MAX_REQUEST_TIMEOUT_SECS} seconds."
            ));
        }

        if self.body_limit.max_body_size == 0 {
            return Err(anyhow!("Maximum body size must be greater than 0 bytes"));
        }

        Ok(())
    }

    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            credentials = self.cors.allow_credentials,
            "CORS configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            max_body_size = self.body_limit.max_body_size,
            "Recovery configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MiddlewareConfig {
        MiddlewareConfig {
            cors: CorsConfig::default(),
            recovery: RecoveryConfig::default(),
            body_limit: BodyLimitConfig::default(),
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn reject_zero_request_timeout() {
        let mut config = config();
        config.recovery = RecoveryConfig::with_timeout_secs(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_zero_body_limit() {
        let mut config = config();
        config.body_limit = BodyLimitConfig::new(0);
        assert!(config.validate().is_err());
    }
}
