pub mod image_client;

use crate::{
    config::GeminiConfig,
    error::{OutfitError, Result},
    models::ApiErrorResponse,
};
use reqwest::Client;
use std::time::Duration;

pub use image_client::GeminiImageClient;

pub(crate) const API_KEY_HEADER: &str = "x-goog-api-key";

pub(crate) fn build_http_client(config: &GeminiConfig) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| OutfitError::ConfigError(format!("Failed to build HTTP client: {}", e)))
}

/// Turns a non-success response body into a readable message, preferring the
/// API's own `error.message`.
pub(crate) fn describe_api_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => match parsed.error.status {
            Some(kind) => format!("{} ({}): {}", status, kind, parsed.error.message),
            None => format!("{}: {}", status, parsed.error.message),
        },
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => format!("{}: {}", status, body.trim()),
    }
}
