#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use vlmgate_server::handler::routes;
use vlmgate_server::middleware::{RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt};
use vlmgate_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig, create_inference_service};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "vlmgate_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "vlmgate_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "vlmgate_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let inference =
        create_inference_service(&cli.inference).context("failed to create inference client")?;
    let state = ServiceState::new(cli.service.clone(), inference);
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs and tracing spans
/// 3. Security - CORS, security headers, body limits
/// 4. Routes (innermost) - document and monitor handlers
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes()
        .with_state(state)
        .with_security(&middleware.cors, &middleware.body_limit)
        .with_observability()
        .with_recovery(&middleware.recovery)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderName, StatusCode};
    use axum_test::TestServer;
    use vlmgate_inference::mock::MockProvider;
    use vlmgate_server::middleware::{BodyLimitConfig, CorsConfig, RecoveryConfig};
    use vlmgate_server::service::ServiceConfig;

    use super::*;

    fn middleware() -> MiddlewareConfig {
        MiddlewareConfig {
            cors: CorsConfig::default(),
            recovery: RecoveryConfig::default(),
            body_limit: BodyLimitConfig::default(),
        }
    }

    #[tokio::test]
    async fn router_serves_health_behind_middleware() -> anyhow::Result<()> {
        let inference = MockProvider::default().into_service();
        let state = ServiceState::new(ServiceConfig::default(), inference);
        let server = TestServer::new(create_router(state, &middleware()))?;

        let response = server.get("/health").await;
        response.assert_status_ok();
        let request_id = response.header(HeaderName::from_static("x-request-id"));
        assert!(!request_id.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn router_relays_completions() -> anyhow::Result<()> {
        let provider = MockProvider::default();
        let state = ServiceState::new(ServiceConfig::default(), provider.clone().into_service());
        let server = TestServer::new(create_router(state, &middleware()))?;

        server
            .post("/api/ocr")
            .json(&serde_json::json!({ "base64Image": "AAAA" }))
            .await
            .assert_status_ok();
        server
            .post("/api/unknown")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        assert_eq!(provider.call_count(), 1);
        Ok(())
    }
}
