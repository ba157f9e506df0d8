//! Reqwest-based client for OpenAI-compatible chat completion endpoints.
//!
//! This module provides a reqwest-based implementation of the [`InferenceProvider`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use vlmgate_inference::reqwest::{ReqwestClient, ReqwestConfig};
//! use vlmgate_inference::InferenceService;
//!
//! let config = ReqwestConfig::new("http://10.0.0.5:8000/v1");
//! let service: InferenceService = ReqwestClient::new(config)?.into_service();
//! ```
//!
//! [`InferenceProvider`]: crate::InferenceProvider

mod client;
mod config;
mod error;

pub use client::ReqwestClient;
pub use config::{CHAT_COMPLETIONS_PATH, DEFAULT_BASE_URL, ReqwestConfig};
pub use error::{Error, Result};

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "vlmgate_inference::reqwest";
