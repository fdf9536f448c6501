use flatlay::{codec, GeminiConfig, OutfitGenerator};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    flatlay::logger::init()?;
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }

    let path = env::args()
        .nth(1)
        .ok_or("usage: cargo run --example outfits -- <image>")?;

    let image = codec::read_image_file(&path).await?;
    let generator = OutfitGenerator::from_config(GeminiConfig::from_env())?;

    for outfit in generator.generate_outfits(&image).await? {
        println!("{}: {} characters", outfit.title, outfit.image_url.len());
    }

    Ok(())
}
