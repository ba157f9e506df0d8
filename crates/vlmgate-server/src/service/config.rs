#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::service::Task;

/// Default values for configuration options.
mod defaults {
    /// Model served by the default vLLM deployment.
    pub const INFERENCE_MODEL: &str = "Qwen/Qwen3-VL-8B-Instruct-FP8";

    pub fn inference_model() -> String {
        INFERENCE_MODEL.to_owned()
    }
}

/// App [`state`] configuration: which model serves each task.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Model identifier used when a task has no dedicated model
    #[cfg_attr(
        feature = "config",
        arg(
            long = "inference-model",
            env = "INFERENCE_MODEL",
            default_value = defaults::INFERENCE_MODEL
        )
    )]
    #[serde(default = "defaults::inference_model")]
    pub inference_model: String,

    /// Model identifier for OCR requests
    #[cfg_attr(feature = "config", arg(long = "ocr-model", env = "OCR_MODEL"))]
    #[serde(default)]
    pub ocr_model: Option<String>,

    /// Model identifier for counting requests
    #[cfg_attr(feature = "config", arg(long = "counting-model", env = "COUNTING_MODEL"))]
    #[serde(default)]
    pub counting_model: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            inference_model: defaults::inference_model(),
            ocr_model: None,
            counting_model: None,
        }
    }
}

impl ServiceConfig {
    /// Creates a configuration that serves every task with one model.
    pub fn new(inference_model: impl Into<String>) -> Self {
        Self {
            inference_model: inference_model.into(),
            ..Self::default()
        }
    }

    /// Sets the dedicated model for a task.
    pub fn with_task_model(mut self, task: Task, model: impl Into<String>) -> Self {
        let model = Some(model.into());
        match task {
            Task::Ocr => self.ocr_model = model,
            Task::Counting => self.counting_model = model,
        }
        self
    }

    /// Returns the model identifier that serves the given task.
    pub fn model_for(&self, task: Task) -> &str {
        let dedicated = match task {
            Task::Ocr => self.ocr_model.as_deref(),
            Task::Counting => self.counting_model.as_deref(),
        };

        dedicated
            .filter(|model| !model.is_empty())
            .unwrap_or(&self.inference_model)
    }

    /// Validates that a default model is configured.
    pub fn validate(&self) -> Result<(), String> {
        if self.inference_model.trim().is_empty() {
            return Err("Inference model cannot be empty".to_owned());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_serves_all_tasks() {
        let config = ServiceConfig::default();
        assert_eq!(config.model_for(Task::Ocr), defaults::INFERENCE_MODEL);
        assert_eq!(config.model_for(Task::Counting), defaults::INFERENCE_MODEL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn task_model_overrides_default() {
        let config = ServiceConfig::new("qwen").with_task_model(Task::Ocr, "olmocr");
        assert_eq!(config.model_for(Task::Ocr), "olmocr");
        assert_eq!(config.model_for(Task::Counting), "qwen");
    }

    #[test]
    fn empty_override_falls_back() {
        let config = ServiceConfig::new("qwen").with_task_model(Task::Counting, "");
        assert_eq!(config.model_for(Task::Counting), "qwen");
    }

    #[test]
    fn empty_default_model_is_invalid() {
        assert!(ServiceConfig::new(" ").validate().is_err());
    }
}
