//! Conversion between uploads, data URIs and [`EncodedImage`].

use crate::{
    error::{OutfitError, Result},
    models::EncodedImage,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

const GENERATED_MIME_TYPE: &str = "image/png";

impl EncodedImage {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Result<Self> {
        let data = data.into();
        let mime_type = mime_type.into();

        if !is_media_type(&mime_type) {
            return Err(OutfitError::DecodeError(format!(
                "unrecognised media type '{}'",
                mime_type
            )));
        }
        if data.trim().is_empty() {
            return Err(OutfitError::DecodeError("image payload is empty".into()));
        }

        Ok(Self { data, mime_type })
    }

    /// Parses `data:<type>/<subtype>[;params];base64,<payload>`.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let (header, payload) = uri.split_once(',').ok_or_else(|| {
            OutfitError::DecodeError("data URI has no ',' separating header and payload".into())
        })?;

        let header = header
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| OutfitError::DecodeError("input is not a data URI".into()))?;

        let mut params = header.split(';');
        let mime_type = params.next().unwrap_or_default().trim();
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(OutfitError::DecodeError(
                "data URI payload is not base64 encoded".into(),
            ));
        }

        Self::new(payload.trim(), mime_type.to_ascii_lowercase())
    }

    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(OutfitError::DecodeError("image file is empty".into()));
        }
        Self::new(STANDARD.encode(bytes), mime_type)
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Reads an image from disk. The MIME type comes from the file extension.
pub async fn read_image_file(path: impl AsRef<Path>) -> Result<EncodedImage> {
    let path = path.as_ref();
    let mime_type = mime_type_for_path(path).ok_or_else(|| {
        OutfitError::DecodeError(format!(
            "unsupported image type for '{}'",
            path.display()
        ))
    })?;

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        OutfitError::DecodeError(format!("failed to read '{}': {}", path.display(), e))
    })?;

    log::debug!(
        "Read {} bytes of {} from {}",
        bytes.len(),
        mime_type,
        path.display()
    );

    EncodedImage::from_bytes(&bytes, mime_type)
}

pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime_type = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => return None,
    };
    Some(mime_type)
}

/// `data:image/png;base64,...` for generated image bytes.
pub fn png_data_uri(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", GENERATED_MIME_TYPE, STANDARD.encode(bytes))
}

fn is_media_type(value: &str) -> bool {
    let is_token = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || "!#$&-^_.+".contains(c))
    };
    match value.split_once('/') {
        Some((kind, subtype)) => is_token(kind) && is_token(subtype),
        None => false,
    }
}
