//! Application state and dependency injection.

use vlmgate_inference::InferenceService;

use crate::service::ServiceConfig;

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    inference: InferenceService,
    config: ServiceConfig,
}

impl ServiceState {
    /// Assembles the state from an inference service and the model configuration.
    pub fn new(config: ServiceConfig, inference: InferenceService) -> Self {
        Self { inference, config }
    }

    /// Returns the model configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(inference: InferenceService);
impl_di!(config: ServiceConfig);
