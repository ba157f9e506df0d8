//! Request types for HTTP handlers.

mod documents;

pub use documents::*;
