use crate::models::OutfitCategory;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutfitError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    /// One category's call failed or came back without an image. `reason`
    /// holds the underlying cause and is kept out of the user-facing message.
    #[error(
        "Failed to generate a valid image for the {category} outfit. The model might be unable to process this request."
    )]
    GenerationError {
        category: OutfitCategory,
        reason: String,
    },

    #[error("Request error: {0}")]
    RequestError(String),

    #[error("Response error: {0}")]
    ResponseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl OutfitError {
    pub fn generation(category: OutfitCategory, reason: impl Into<String>) -> Self {
        OutfitError::GenerationError {
            category,
            reason: reason.into(),
        }
    }

    /// The category that failed, if this is a generation failure.
    pub fn category(&self) -> Option<OutfitCategory> {
        match self {
            OutfitError::GenerationError { category, .. } => Some(*category),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, OutfitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_error_names_the_category() {
        let err = OutfitError::generation(OutfitCategory::NightOut, "timeout");
        assert_eq!(
            err.to_string(),
            "Failed to generate a valid image for the Night Out outfit. The model might be unable to process this request."
        );
        assert_eq!(err.category(), Some(OutfitCategory::NightOut));
    }

    #[test]
    fn config_error_is_verbatim() {
        let err = OutfitError::ConfigError("API_KEY environment variable not set".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: API_KEY environment variable not set"
        );
        assert_eq!(err.category(), None);
    }
}
