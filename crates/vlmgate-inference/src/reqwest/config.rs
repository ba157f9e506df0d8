//! Reqwest client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Default base URL of the OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/v1";

/// Path appended to the base URL for chat completions.
pub const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

/// Configuration for the reqwest inference client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ReqwestConfig {
    /// Base URL of the OpenAI-compatible API, including the version segment
    #[cfg_attr(
        feature = "config",
        arg(
            long = "inference-base-url",
            env = "INFERENCE_BASE_URL",
            default_value = DEFAULT_BASE_URL
        )
    )]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client-side timeout for a whole completion in seconds (unset waits indefinitely)
    #[cfg_attr(
        feature = "config",
        arg(long = "inference-timeout", env = "INFERENCE_TIMEOUT")
    )]
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "inference-user-agent", env = "INFERENCE_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl ReqwestConfig {
    /// Create a new configuration pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validates the base URL and timeout.
    pub fn validate(&self) -> Result<()> {
        self.completions_url()?;

        if self.timeout_secs == Some(0) {
            return Err(Error::configuration()
                .with_message("Inference timeout must be greater than 0 seconds"));
        }

        Ok(())
    }

    /// Resolves `{base_url}/chat/completions`.
    pub fn completions_url(&self) -> Result<Url> {
        let mut base = Url::parse(&self.base_url).map_err(|e| {
            Error::configuration()
                .with_message(format!("Invalid inference base URL '{}': {e}", self.base_url))
                .with_source(e)
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::configuration().with_message(format!(
                "Inference base URL must use http or https, got '{}'",
                base.scheme()
            )));
        }

        // Without a trailing slash `join` would replace the last segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        base.join(CHAT_COMPLETIONS_PATH).map_err(|e| {
            Error::configuration()
                .with_message(format!("Invalid inference base URL '{}': {e}", self.base_url))
                .with_source(e)
        })
    }

    /// Returns the client-side timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(Self::default_user_agent)
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("vlmgate/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_default_config() {
        let config = ReqwestConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout().is_none());
        assert!(config.user_agent.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_completions_url_with_and_without_trailing_slash() {
        let plain = ReqwestConfig::new("http://10.0.0.5:8000/v1");
        let slashed = ReqwestConfig::new("http://10.0.0.5:8000/v1/");

        assert_eq!(
            plain.completions_url().unwrap().as_str(),
            "http://10.0.0.5:8000/v1/chat/completions"
        );
        assert_eq!(
            slashed.completions_url().unwrap().as_str(),
            "http://10.0.0.5:8000/v1/chat/completions"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let error = ReqwestConfig::new("not a url").validate().unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);

        let error = ReqwestConfig::new("ftp://host/v1").validate().unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = ReqwestConfig::default().with_timeout(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ReqwestConfig::default()
            .with_timeout(120)
            .with_user_agent("custom-agent/1.0");

        assert_eq!(config.timeout(), Some(Duration::from_secs(120)));
        assert_eq!(config.effective_user_agent(), "custom-agent/1.0");
    }

    #[test]
    fn test_effective_user_agent_uses_default_when_none() {
        let config = ReqwestConfig::default();
        assert!(config.effective_user_agent().starts_with("vlmgate/"));
    }
}
