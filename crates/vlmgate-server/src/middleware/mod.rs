//! Middleware for `axum::Router` and HTTP request processing.
//!
//! This module provides middleware for:
//! - Security (CORS, headers, body limits)
//! - Observability (tracing, request IDs)
//! - Recovery (panics, timeouts, service errors)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::Router;
//! use vlmgate_server::middleware::{
//!     RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_default_security()
//!     .with_observability()
//!     .with_default_recovery();
//! ```

mod observability;
mod recovery;
mod security;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{BodyLimitConfig, CorsConfig, DEFAULT_MAX_BODY_SIZE, RouterSecurityExt};
