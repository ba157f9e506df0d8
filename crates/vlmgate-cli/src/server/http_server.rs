//! HTTP server startup.

use std::future::IntoFuture;
use std::io;
use std::net::SocketAddr;
use std::pin::pin;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::lifecycle::{log_server_error, serve_with_shutdown};
use super::shutdown::shutdown_signal;
use super::{ServerError, ServerResult};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Starts an HTTP server with graceful shutdown.
///
/// Validates the configuration, binds to the configured address and serves
/// requests until `SIGINT`/`SIGTERM`. In-flight requests then get up to the
/// shutdown timeout to finish.
///
/// # Errors
///
/// Returns an error if:
/// - Server configuration is invalid
/// - Cannot bind to the specified address/port
/// - Server encounters a fatal error during operation
pub async fn serve_http(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    if let Err(validation_error) = server_config.validate() {
        let error = ServerError::invalid_config(&validation_error);
        log_server_error(&error);
        return Err(error);
    }

    let server_addr = server_config.server_addr();
    let listener = bind(server_addr).await?;
    let shutdown_timeout = server_config.shutdown_timeout();

    serve_with_shutdown(&server_config, move || {
        serve_until_signal(listener, app, shutdown_timeout)
    })
    .await
}

/// Binds a TCP listener to the given address.
async fn bind(server_addr: SocketAddr) -> ServerResult<TcpListener> {
    match TcpListener::bind(server_addr).await {
        Ok(listener) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_STARTUP,
                addr = %server_addr,
                "Successfully bound to address"
            );
            Ok(listener)
        }
        Err(listener_err) => {
            let error = ServerError::bind_error(server_addr, listener_err);
            log_server_error(&error);
            Err(error)
        }
    }
}

/// Serves until a shutdown signal, then drains for at most `shutdown_timeout`.
async fn serve_until_signal(
    listener: TcpListener,
    app: Router,
    shutdown_timeout: Duration,
) -> io::Result<()> {
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = signalled_tx.send(());
    });
    let mut server = pin!(server.into_future());

    let finished = tokio::select! {
        result = &mut server => Some(result),
        Ok(()) = signalled_rx => None,
    };

    if let Some(result) = finished {
        return result;
    }

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        timeout_secs = shutdown_timeout.as_secs(),
        "Graceful shutdown initiated, draining in-flight requests"
    );

    match tokio::time::timeout(shutdown_timeout, server).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                timeout_secs = shutdown_timeout.as_secs(),
                "Shutdown timeout elapsed, dropping remaining connections"
            );
            Ok(())
        }
    }
}
