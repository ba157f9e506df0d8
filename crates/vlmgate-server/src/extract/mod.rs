//! Request extractors with rejections rendered as [`Error`] responses.
//!
//! [`Error`]: crate::handler::Error

mod json;

pub use json::Json;
