//! Monitor response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Liveness status response.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatusResponse {
    /// Whether the process is able to serve requests.
    pub is_healthy: bool,
    /// Timestamp when this status was generated.
    pub updated_at: Timestamp,
}

impl MonitorStatusResponse {
    /// Creates a healthy status stamped with the current time.
    pub fn healthy() -> Self {
        Self {
            is_healthy: true,
            updated_at: Timestamp::now(),
        }
    }
}
