use crate::{
    error::Result,
    models::{GeneratedImage, ImageGenerationRequest},
};
use async_trait::async_trait;

/// The external image model, reduced to the one call outfit generation needs.
#[async_trait]
pub trait ImageModelClient: Send + Sync {
    fn model_id(&self) -> &str;

    /// Sends the item image and prompt, asking for image-only output.
    /// `Ok(None)` means the model answered without any image data.
    async fn generate_image(
        &self,
        request: ImageGenerationRequest<'_>,
    ) -> Result<Option<GeneratedImage>>;
}
