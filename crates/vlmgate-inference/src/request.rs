//! Chat completion request types.
//!
//! The wire format follows the OpenAI `/chat/completions` schema with vision
//! content parts, as served by vLLM, LM Studio and similar hosts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Sampling temperature sent with every request.
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

/// Upper bound on generated tokens sent with every request.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// MIME type declared in the image data URI, whatever the source document was.
pub const IMAGE_MIME_TYPE: &str = "image/png";

/// A complete chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model identifier as known to the inference host.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    /// Builds a single-turn vision request: the instruction followed by the image.
    pub fn vision(model: impl Into<String>, instruction: impl Into<String>, image: &ImageData) -> Self {
        let message = ChatMessage::user(vec![
            ContentPart::text(instruction),
            ContentPart::image_url(image.to_data_uri()),
        ]);

        Self {
            model: model.into(),
            messages: vec![message],
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Returns the number of messages in the request.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message made of content parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: Vec<ContentPart>,
}

impl ChatMessage {
    /// Creates a user message.
    pub fn user(content: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content,
        }
    }
}

/// One segment of multimodal message content.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text segment.
    Text { text: String },
    /// Image segment, referenced by URL or inlined as a data URI.
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    /// Creates a text segment.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Creates an image segment.
    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }

    /// Returns the text of a text segment.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::ImageUrl { .. } => None,
        }
    }

    /// Returns the URL of an image segment.
    pub fn as_image_url(&self) -> Option<&str> {
        match self {
            Self::Text { .. } => None,
            Self::ImageUrl { image_url } => Some(&image_url.url),
        }
    }
}

// Data URIs can be tens of megabytes; only their length is printed.
impl fmt::Debug for ContentPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { text } => f.debug_struct("Text").field("text", text).finish(),
            Self::ImageUrl { image_url } => f
                .debug_struct("ImageUrl")
                .field("url_len", &image_url.url.len())
                .finish(),
        }
    }
}

/// Image reference of an [`ContentPart::ImageUrl`] segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Base64-encoded image payload.
///
/// The payload is opaque: it is never decoded, only re-embedded in a data URI.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData(String);

impl ImageData {
    /// Wraps a base64 payload, rejecting the empty string.
    pub fn new(base64: impl Into<String>) -> Result<Self> {
        let base64 = base64.into();
        if base64.is_empty() {
            return Err(Error::invalid_input().with_message("image payload is empty"));
        }

        Ok(Self(base64))
    }

    /// Returns the base64 payload.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the payload length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; empty payloads are rejected by [`ImageData::new`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Formats the payload as `data:image/png;base64,<payload>`.
    pub fn to_data_uri(&self) -> String {
        format!("data:{IMAGE_MIME_TYPE};base64,{}", self.0)
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("len", &self.0.len())
            .finish()
    }
}
