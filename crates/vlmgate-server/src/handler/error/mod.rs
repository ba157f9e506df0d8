//! [`Error`], [`ErrorKind`] and [`Result`].

mod http_error;
mod inference_error;

pub use http_error::{Error, ErrorKind, Result};
