use serde::Serialize;

/// An uploaded item as a base64 payload plus its MIME type.
///
/// Only built through the validating constructors in [`crate::codec`], so
/// `data` is never empty and `mime_type` is always `type/subtype`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    pub(crate) data: String,
    pub(crate) mime_type: String,
}

impl EncodedImage {
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

#[derive(Debug, Clone)]
pub struct ImageGenerationRequest<'a> {
    pub image: &'a EncodedImage,
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: Option<String>,
    pub model: String,
}
