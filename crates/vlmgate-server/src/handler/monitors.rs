//! Liveness probe handler.

use axum::Router;
use axum::routing::get;

use super::response::MonitorStatusResponse;
use crate::extract::Json;
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "vlmgate_server::handler::monitors";

/// Reports that the process is serving requests.
///
/// The inference host is not contacted.
#[tracing::instrument(skip_all)]
async fn health_status() -> Result<Json<MonitorStatusResponse>> {
    let response = MonitorStatusResponse::healthy();

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy = response.is_healthy,
        "Health status response prepared"
    );

    Ok(Json(response))
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}
