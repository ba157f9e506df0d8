//! Chat completion response types.

use bytes::Bytes;
use serde_json::Value;

use crate::Result;

/// A chat completion exactly as returned by the inference host.
///
/// The body is checked to be JSON but is otherwise kept untouched, so it can
/// be relayed byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    body: Bytes,
    keys: Vec<String>,
    choices: Option<usize>,
}

impl Completion {
    /// Parses the body once to confirm it is JSON and to collect its summary.
    pub fn from_bytes(body: impl Into<Bytes>) -> Result<Self> {
        let body = body.into();
        let value: Value = serde_json::from_slice(&body)?;

        let keys = value
            .as_object()
            .map(|object| object.keys().cloned().collect())
            .unwrap_or_default();
        let choices = value
            .get("choices")
            .and_then(Value::as_array)
            .map(Vec::len);

        Ok(Self {
            body,
            keys,
            choices,
        })
    }

    /// Returns the raw JSON body.
    pub fn as_bytes(&self) -> &Bytes {
        &self.body
    }

    /// Consumes the completion, returning the raw JSON body.
    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    /// Top-level keys of the JSON object, empty for non-object bodies.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of entries in `choices`, if present.
    pub fn choices(&self) -> Option<usize> {
        self.choices
    }
}
