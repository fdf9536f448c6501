use super::traits::ImageModelClient;
use crate::{
    codec::png_data_uri,
    error::{OutfitError, Result},
    models::{EncodedImage, ImageGenerationRequest, Outfit, OutfitCategory},
};

pub fn build_prompt(category: OutfitCategory) -> String {
    format!(
        "Based on this single clothing item, generate a complete, stylish {category} outfit \
         ({goal}). Use the supplied item as the only clothing item from the photo and build \
         the rest of the look around it. Display it as a clean 'flat-lay' on a neutral light \
         gray background to keep the focus on the clothes. The generated image should only \
         contain the clothing items.",
        category = category,
        goal = category.styling_goal(),
    )
}

/// Generates the outfit for one category. Any failure comes back as a
/// [`OutfitError::GenerationError`] naming `category`.
pub async fn generate_one<C>(
    client: &C,
    category: OutfitCategory,
    image: &EncodedImage,
) -> Result<Outfit>
where
    C: ImageModelClient + ?Sized,
{
    let request = ImageGenerationRequest {
        image,
        prompt: build_prompt(category),
    };

    let generated = match client.generate_image(request).await {
        Ok(Some(generated)) if !generated.bytes.is_empty() => generated,
        Ok(_) => {
            log::error!("No image data returned for {} category", category);
            return Err(OutfitError::generation(
                category,
                format!("No image data returned for {} category.", category),
            ));
        }
        Err(e) => {
            log::error!("Error generating outfit for {}: {}", category, e);
            return Err(OutfitError::generation(category, e.to_string()));
        }
    };

    log::debug!(
        "{} image from {}: {} bytes",
        category,
        generated.model,
        generated.bytes.len()
    );

    Ok(Outfit {
        title: category.title(),
        image_url: png_data_uri(&generated.bytes),
    })
}
