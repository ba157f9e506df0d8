//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig         # Host, port, shutdown
//! ├── middleware: MiddlewareConfig # CORS, body limit, recovery/timeouts
//! ├── service: ServiceConfig       # Model per task
//! └── inference: ReqwestConfig     # Inference endpoint base URL, timeout
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Point at a remote vLLM host
//! vlmgate --inference-base-url "http://10.0.0.5:8000/v1" --port 8080
//!
//! # Or via environment variables
//! INFERENCE_BASE_URL="http://10.0.0.5:8000/v1" PORT=8080 vlmgate
//! ```

mod middleware;
mod provider;
mod server;

use std::process;

use anyhow::{Context, anyhow};
use clap::Parser;
pub use middleware::MiddlewareConfig;
pub use provider::create_inference_service;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use vlmgate_inference::reqwest::ReqwestConfig;
use vlmgate_server::service::{ServiceConfig, Task};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
///
/// Combines all configuration groups for the gateway:
/// - [`ServerConfig`]: Network binding and shutdown
/// - [`MiddlewareConfig`]: HTTP middleware (CORS, body limit, recovery)
/// - [`ServiceConfig`]: Which model serves each task
/// - [`ReqwestConfig`]: The OpenAI-compatible inference endpoint
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "vlmgate")]
#[command(about = "Document OCR and inventory counting gateway for vision-language models")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, body limit, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Model selection per task.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Inference endpoint configuration.
    #[clap(flatten)]
    pub inference: ReqwestConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments, so its values
    /// act as defaults for every `env = "..."` option.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;

        self.middleware
            .validate()
            .context("invalid middleware configuration")?;

        self.service
            .validate()
            .map_err(|message| anyhow!(message))
            .context("invalid model configuration")?;

        self.inference
            .validate()
            .context("invalid inference configuration")?;

        Ok(())
    }

    /// Logs configuration (no image data, no secrets).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            base_url = %self.inference.base_url,
            timeout_secs = ?self.inference.timeout_secs,
            ocr_model = %self.service.model_for(Task::Ocr),
            counting_model = %self.service.model_for(Task::Counting),
            "Inference configuration"
        );
    }

    /// Logs startup and build information.
    fn log_build_info() {
        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            "Starting vlmgate server"
        );

        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
