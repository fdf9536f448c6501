//! Generate Casual, Business and Night Out flat-lay outfit images around a
//! single uploaded clothing item.
//!
//! ```no_run
//! # async fn run() -> flatlay::Result<()> {
//! let image = flatlay::codec::read_image_file("shirt.jpg").await?;
//! let generator = flatlay::OutfitGenerator::from_config(flatlay::GeminiConfig::from_env())?;
//! for outfit in generator.generate_outfits(&image).await? {
//!     println!("{}: {} chars", outfit.title, outfit.image_url.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod gemini;
pub mod generation;
pub mod logger;
pub mod models;

pub use config::GeminiConfig;
pub use error::{OutfitError, Result};
pub use gemini::GeminiImageClient;
pub use generation::{
    generate_one, generate_outfits, generate_outfits_with_config, ImageModelClient,
    OutfitGenerator,
};
pub use models::{
    EncodedImage, GeneratedImage, ImageGenerationRequest, ModelInfo, Outfit, OutfitCategory,
};
