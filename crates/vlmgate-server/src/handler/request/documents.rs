//! Document task request types.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use vlmgate_inference::ImageData;

use crate::handler::{Error, ErrorKind};

/// Message returned when the request carries no image.
pub const MISSING_IMAGE_MESSAGE: &str = "base64Image is required";

/// Kind of document the image was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FileKind {
    /// A PDF page rendered to an image by the caller.
    Pdf,
    /// Any other image source.
    #[serde(other)]
    Image,
}

/// Body of `POST /api/ocr` and `POST /api/counting`.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    /// Base64 image content, without a data URI prefix.
    #[serde(default)]
    pub base64_image: Option<String>,
    /// Source document kind.
    #[serde(default)]
    pub file_type: Option<FileKind>,
}

impl DocumentPayload {
    /// Length of the base64 payload, zero when absent.
    pub fn image_len(&self) -> usize {
        self.base64_image.as_deref().map_or(0, str::len)
    }

    /// Takes the image out of the payload, rejecting absent, null or empty values.
    pub fn into_image(self) -> Result<ImageData, Error<'static>> {
        let base64 = self.base64_image.unwrap_or_default();
        ImageData::new(base64).map_err(|_| ErrorKind::BadRequest.with_message(MISSING_IMAGE_MESSAGE))
    }
}
