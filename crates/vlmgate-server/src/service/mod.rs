//! Application state, configuration and the task catalog.

mod config;
mod prompt;
mod state;
mod task;

pub use crate::service::config::ServiceConfig;
pub use crate::service::prompt::{COUNTING_INSTRUCTION, OCR_INSTRUCTION};
pub use crate::service::state::ServiceState;
pub use crate::service::task::Task;
