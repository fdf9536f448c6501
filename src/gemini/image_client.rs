use super::{build_http_client, describe_api_error, API_KEY_HEADER};
use crate::{
    config::GeminiConfig,
    error::{OutfitError, Result},
    generation::ImageModelClient,
    models::{
        Content, GenerateContentRequest, GenerateContentResponse, GeneratedImage,
        GenerationConfig, ImageGenerationRequest, InlineData, ModelInfo, OutputModality, Part,
    },
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;

#[derive(Clone)]
pub struct GeminiImageClient {
    client: Client,
    api_key: String,
    model_id: String,
    endpoint: String,
}

impl GeminiImageClient {
    /// Fails with a configuration error when no API key is set.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        Ok(Self {
            client: build_http_client(config)?,
            api_key,
            model_id: config.model_id().to_string(),
            endpoint: config.endpoint(),
        })
    }

    pub fn supported_models() -> Vec<ModelInfo> {
        vec![
            ModelInfo {
                id: "gemini-2.5-flash-image".into(),
                name: "Gemini 2.5 Flash Image".into(),
                provider: "Google".into(),
                output: OutputModality::Image,
                description: "Fast image generation and editing from text and image input"
                    .into(),
            },
            ModelInfo {
                id: "gemini-2.5-flash-image-preview".into(),
                name: "Gemini 2.5 Flash Image (preview)".into(),
                provider: "Google".into(),
                output: OutputModality::Image,
                description: "Preview release of Gemini 2.5 Flash Image".into(),
            },
            ModelInfo {
                id: "gemini-2.0-flash-preview-image-generation".into(),
                name: "Gemini 2.0 Flash image generation".into(),
                provider: "Google".into(),
                output: OutputModality::Image,
                description: "Earlier conversational image generation model".into(),
            },
        ]
    }

    pub(crate) fn build_request(request: &ImageGenerationRequest<'_>) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: request.image.mime_type().to_string(),
                            data: request.image.data().to_string(),
                        },
                    },
                    Part::Text {
                        text: request.prompt.clone(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec![OutputModality::Image],
            },
        }
    }

    pub(crate) fn extract_image(
        &self,
        response: &GenerateContentResponse,
    ) -> Result<Option<GeneratedImage>> {
        let inline = match response.first_inline_image() {
            Some(inline) => inline,
            None => {
                log::warn!(
                    "Model {} returned no image (finish reason: {})",
                    self.model_id,
                    response.finish_reason().unwrap_or("unknown")
                );
                return Ok(None);
            }
        };

        let bytes = STANDARD
            .decode(inline.data.trim())
            .map_err(|e| OutfitError::ResponseError(format!("Invalid base64 image data: {}", e)))?;

        Ok(Some(GeneratedImage {
            bytes,
            mime_type: Some(inline.mime_type.clone()),
            model: self.model_id.clone(),
        }))
    }
}

#[async_trait]
impl ImageModelClient for GeminiImageClient {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate_image(
        &self,
        request: ImageGenerationRequest<'_>,
    ) -> Result<Option<GeneratedImage>> {
        let payload = Self::build_request(&request);

        log::info!("Generating image with model: {}", self.model_id);
        log::debug!(
            "Request image: {} ({} base64 chars)",
            request.image.mime_type(),
            request.image.data().len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| OutfitError::RequestError(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        log::debug!("Gemini responded with {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| OutfitError::ResponseError(e.to_string()))?;

        if !status.is_success() {
            return Err(OutfitError::RequestError(describe_api_error(status, &body)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| OutfitError::SerializationError(e.to_string()))?;

        self.extract_image(&parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EncodedImage;

    fn client() -> GeminiImageClient {
        GeminiImageClient::new(&GeminiConfig::new().with_api_key("test-key")).unwrap()
    }

    #[test]
    fn requires_api_key() {
        assert!(matches!(
            GeminiImageClient::new(&GeminiConfig::new()),
            Err(OutfitError::ConfigError(_))
        ));
    }

    #[test]
    fn request_body_uses_gemini_field_names() {
        let image = EncodedImage::new("QUJD", "image/jpeg").unwrap();
        let request = ImageGenerationRequest {
            image: &image,
            prompt: "flat-lay please".into(),
        };

        let body = serde_json::to_value(GeminiImageClient::build_request(&request)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "contents": [{
                    "parts": [
                        { "inlineData": { "mimeType": "image/jpeg", "data": "QUJD" } },
                        { "text": "flat-lay please" }
                    ]
                }],
                "generationConfig": { "responseModalities": ["IMAGE"] }
            })
        );
    }

    #[test]
    fn finds_image_after_a_text_part() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[
                {"text":"Here is your outfit."},
                {"inlineData":{"mimeType":"image/png","data":"QUJD"}}
            ]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();

        let image = client().extract_image(&response).unwrap().unwrap();
        assert_eq!(image.bytes, b"ABC");
        assert_eq!(image.mime_type.as_deref(), Some("image/png"));
        assert_eq!(image.model, "gemini-2.5-flash-image");
    }

    #[test]
    fn no_candidates_means_no_image() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(client().extract_image(&response).unwrap().is_none());

        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"I can't help with that."}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert!(client().extract_image(&response).unwrap().is_none());
    }

    #[test]
    fn invalid_base64_is_a_response_error() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"@@@"}}]}}]}"#,
        )
        .unwrap();
        assert!(matches!(
            client().extract_image(&response),
            Err(OutfitError::ResponseError(_))
        ));
    }

    #[test]
    fn catalog_lists_the_default_model() {
        let models = GeminiImageClient::supported_models();
        assert!(models.iter().any(|m| m.id == crate::config::DEFAULT_MODEL));
        assert!(models.iter().all(|m| m.output == OutputModality::Image));
    }
}
