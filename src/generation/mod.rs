pub mod outfit_client;
pub mod traits;

use crate::{
    config::GeminiConfig,
    error::Result,
    gemini::GeminiImageClient,
    logger,
    models::{EncodedImage, Outfit, OutfitCategory},
};
use futures::future::join_all;
use uuid::Uuid;

pub use outfit_client::{build_prompt, generate_one};
pub use traits::ImageModelClient;

/// Fans one request per [`OutfitCategory`] out to an [`ImageModelClient`]
/// and returns either every outfit or the first failure.
pub struct OutfitGenerator<C> {
    config: GeminiConfig,
    client: C,
}

impl OutfitGenerator<GeminiImageClient> {
    pub fn from_config(config: GeminiConfig) -> Result<Self> {
        let client = GeminiImageClient::new(&config)?;
        Ok(Self::new(config, client))
    }
}

impl<C: ImageModelClient> OutfitGenerator<C> {
    pub fn new(config: GeminiConfig, client: C) -> Self {
        Self { config, client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// All categories are in flight at once and every call settles before
    /// returning. The result is in category declaration order, and a single
    /// failure fails the whole set.
    pub async fn generate_outfits(&self, image: &EncodedImage) -> Result<Vec<Outfit>> {
        self.config.require_api_key()?;

        let run_id = Uuid::new_v4();
        let _timer = logger::timer(&format!("outfit generation [run:{}]", run_id));

        log::info!(
            "Dispatching {} outfit generations with model {} [run:{}]",
            OutfitCategory::ALL.len(),
            self.client.model_id(),
            run_id
        );

        let pending = OutfitCategory::ALL
            .into_iter()
            .map(|category| generate_one(&self.client, category, image));

        let settled = join_all(pending).await;

        match settled.into_iter().collect::<Result<Vec<Outfit>>>() {
            Ok(outfits) => {
                log::info!("Generated {} outfits [run:{}]", outfits.len(), run_id);
                Ok(outfits)
            }
            Err(e) => {
                log::error!("Outfit generation failed [run:{}]: {}", run_id, e);
                Err(e)
            }
        }
    }
}

/// Entry point for front ends: takes the raw base64 payload and MIME type
/// of the uploaded item, reads configuration from the environment, and
/// generates the full outfit set with Gemini.
pub async fn generate_outfits(image_data: &str, mime_type: &str) -> Result<Vec<Outfit>> {
    generate_outfits_with_config(GeminiConfig::from_env(), image_data, mime_type).await
}

pub async fn generate_outfits_with_config(
    config: GeminiConfig,
    image_data: &str,
    mime_type: &str,
) -> Result<Vec<Outfit>> {
    config.require_api_key()?;

    let image = EncodedImage::new(image_data, mime_type)?;
    let generator = OutfitGenerator::from_config(config)?;
    generator.generate_outfits(&image).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::OutfitError,
        models::{GeneratedImage, ImageGenerationRequest},
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct FakeModel {
        delays_ms: [u64; 3],
        failing: Option<OutfitCategory>,
        empty: Option<OutfitCategory>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl FakeModel {
        fn with_delays(delays_ms: [u64; 3]) -> Self {
            Self {
                delays_ms,
                ..Default::default()
            }
        }

        fn failing(mut self, category: OutfitCategory) -> Self {
            self.failing = Some(category);
            self
        }

        fn empty_for(mut self, category: OutfitCategory) -> Self {
            self.empty = Some(category);
            self
        }
    }

    fn category_of(prompt: &str) -> OutfitCategory {
        OutfitCategory::ALL
            .into_iter()
            .find(|c| prompt.contains(&format!("stylish {} outfit", c)))
            .expect("prompt names a category")
    }

    #[async_trait]
    impl ImageModelClient for FakeModel {
        fn model_id(&self) -> &str {
            "fake-image-model"
        }

        async fn generate_image(
            &self,
            request: ImageGenerationRequest<'_>,
        ) -> Result<Option<GeneratedImage>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            let category = category_of(&request.prompt);
            let index = OutfitCategory::ALL
                .iter()
                .position(|c| *c == category)
                .unwrap();
            if self.delays_ms[index] == 0 && self.failing == Some(category) {
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                return Err(OutfitError::RequestError("401 Unauthorized".into()));
            }
            tokio::time::sleep(Duration::from_millis(self.delays_ms[index])).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.failing == Some(category) {
                return Err(OutfitError::RequestError("503 Service Unavailable".into()));
            }
            if self.empty == Some(category) {
                return Ok(None);
            }

            Ok(Some(GeneratedImage {
                bytes: format!("{}|{}", category, request.image.data()).into_bytes(),
                mime_type: Some("image/png".into()),
                model: self.model_id().to_string(),
            }))
        }
    }

    fn configured() -> GeminiConfig {
        GeminiConfig::new().with_api_key("test-key")
    }

    fn item(data: &str) -> EncodedImage {
        EncodedImage::new(data, "image/jpeg").unwrap()
    }

    fn decode_url(outfit: &Outfit) -> String {
        use base64::{engine::general_purpose::STANDARD, Engine as _};
        let payload = outfit
            .image_url
            .strip_prefix("data:image/png;base64,")
            .unwrap();
        String::from_utf8(STANDARD.decode(payload).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn returns_outfits_in_declaration_order() {
        // Casual finishes last, Business first.
        let generator = OutfitGenerator::new(configured(), FakeModel::with_delays([60, 5, 25]));

        let outfits = generator.generate_outfits(&item("QUJD")).await.unwrap();

        let titles: Vec<&str> = outfits.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, ["Casual Look", "Business Look", "Night Out Look"]);
        assert_eq!(decode_url(&outfits[0]), "Casual|QUJD");
        assert_eq!(decode_url(&outfits[2]), "Night Out|QUJD");
        assert_eq!(generator.client().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn dispatches_all_categories_concurrently() {
        let generator = OutfitGenerator::new(configured(), FakeModel::with_delays([20, 20, 20]));

        generator.generate_outfits(&item("QUJD")).await.unwrap();

        assert_eq!(generator.client().max_in_flight.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn one_failure_fails_the_whole_set() {
        let model = FakeModel::with_delays([1, 1, 30]).failing(OutfitCategory::NightOut);
        let generator = OutfitGenerator::new(configured(), model);

        let err = generator.generate_outfits(&item("QUJD")).await.unwrap_err();

        assert_eq!(err.category(), Some(OutfitCategory::NightOut));
        assert!(err.to_string().contains("Night Out outfit"));
    }

    #[tokio::test]
    async fn immediate_failure_still_dispatches_every_category() {
        let model = FakeModel::with_delays([0, 10, 10]).failing(OutfitCategory::Casual);
        let generator = OutfitGenerator::new(configured(), model);

        let err = generator.generate_outfits(&item("QUJD")).await.unwrap_err();

        assert_eq!(err.category(), Some(OutfitCategory::Casual));
        assert_eq!(generator.client().calls.load(Ordering::SeqCst), 3);
        assert_eq!(generator.client().in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_image_data_fails_the_whole_set() {
        let model = FakeModel::with_delays([1, 1, 1]).empty_for(OutfitCategory::Business);
        let generator = OutfitGenerator::new(configured(), model);

        let err = generator.generate_outfits(&item("QUJD")).await.unwrap_err();

        assert_eq!(err.category(), Some(OutfitCategory::Business));
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_call() {
        let generator = OutfitGenerator::new(GeminiConfig::new(), FakeModel::default());

        let err = generator.generate_outfits(&item("QUJD")).await.unwrap_err();

        assert!(matches!(err, OutfitError::ConfigError(_)));
        assert_eq!(generator.client().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invocations_do_not_share_results() {
        let generator = OutfitGenerator::new(configured(), FakeModel::with_delays([3, 1, 2]));

        let (a, b) = (item("Zmlyc3Q="), item("c2Vjb25k"));
        let (first, second) = tokio::join!(
            generator.generate_outfits(&a),
            generator.generate_outfits(&b),
        );
        let (first, second) = (first.unwrap(), second.unwrap());

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.title, b.title);
            assert!(decode_url(a).ends_with("|Zmlyc3Q="));
            assert!(decode_url(b).ends_with("|c2Vjb25k"));
        }
        assert_eq!(generator.client().calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn entry_point_rejects_missing_credential() {
        let err = generate_outfits_with_config(GeminiConfig::new(), "QUJD", "image/jpeg")
            .await
            .unwrap_err();
        assert!(matches!(err, OutfitError::ConfigError(_)));
    }

    #[tokio::test]
    async fn entry_point_rejects_malformed_upload() {
        let err = generate_outfits_with_config(configured(), "QUJD", "jpeg")
            .await
            .unwrap_err();
        assert!(matches!(err, OutfitError::DecodeError(_)));

        let err = generate_outfits_with_config(configured(), "", "image/jpeg")
            .await
            .unwrap_err();
        assert!(matches!(err, OutfitError::DecodeError(_)));
    }
}
