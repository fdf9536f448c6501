use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutfitCategory {
    Casual,
    Business,
    #[serde(rename = "Night Out")]
    NightOut,
}

impl OutfitCategory {
    /// Every category, in the order outfits are returned.
    pub const ALL: [OutfitCategory; 3] = [
        OutfitCategory::Casual,
        OutfitCategory::Business,
        OutfitCategory::NightOut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutfitCategory::Casual => "Casual",
            OutfitCategory::Business => "Business",
            OutfitCategory::NightOut => "Night Out",
        }
    }

    pub fn styling_goal(&self) -> &'static str {
        match self {
            OutfitCategory::Casual => "relaxed, comfortable everyday wear",
            OutfitCategory::Business => "polished, professional office attire",
            OutfitCategory::NightOut => "a confident, dressed-up evening look",
        }
    }

    pub fn title(&self) -> String {
        format!("{} Look", self.as_str())
    }
}

impl fmt::Display for OutfitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    pub title: String,
    /// `data:image/png;base64,...`
    pub image_url: String,
}
