//! Oracle traits: the abstraction over the generative outfit and vision services.
//!
//! An oracle is treated as a black box that returns structured suggestions.
//! Implementations must validate the payload themselves and degrade to a
//! documented fallback on malformed output; the only errors that cross this
//! boundary are transport failures (`OracleError`).
//!
//! Implementations: OpenAI-compatible chat completions, scripted stubs for tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::item::{NewItem, WardrobeItem};
use crate::outfit::{OutfitContext, Slot};

/// Input for a full-outfit suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutfitRequest {
    pub context: OutfitContext,
    /// Laundry-filtered items the oracle may choose from
    pub candidates: Vec<WardrobeItem>,
}

/// One outfit grouping as returned by the oracle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutfitGrouping {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub style_notes: String,
    #[serde(default)]
    pub weather_compatibility: String,
    #[serde(default)]
    pub formality_level: String,
}

/// The oracle's full-outfit answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutfitProposal {
    #[serde(default)]
    pub outfits: Vec<OutfitGrouping>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Input for a single-slot alternative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRequest {
    pub slot: Slot,
    pub context: OutfitContext,
    pub candidates: Vec<WardrobeItem>,
    /// Occupants of the other two slots, held fixed
    pub fixed: Vec<WardrobeItem>,
    /// Current occupant of the slot being swapped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<WardrobeItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotAlternative {
    pub item_id: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotAlternatives {
    #[serde(default)]
    pub alternatives: Vec<SlotAlternative>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// A photo submitted for classification.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
        }
    }

    /// Lowercased extension including the dot, `.png` when absent.
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_else(|| ".png".to_string())
    }

    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_str() {
            ".jpg" | ".jpeg" => "image/jpeg",
            ".webp" => "image/webp",
            ".gif" => "image/gif",
            _ => "image/png",
        }
    }
}

/// The vision oracle's description of a garment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub form: String,
    #[serde(default)]
    pub weather: Vec<String>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl ClassifiedItem {
    /// Placeholder record used when the oracle's answer cannot be parsed.
    ///
    /// Its type `default` maps to no category, so adding it is rejected.
    pub fn fallback() -> Self {
        Self {
            id: "default".into(),
            item_type: "default".into(),
            form: "default".into(),
            weather: vec!["default".into(), "default".into()],
            color: "default".into(),
            notes: "default".into(),
            count: 1,
        }
    }

    /// Drop the oracle's suggested id; ids are assigned by the wardrobe.
    pub fn into_new_item(self) -> NewItem {
        NewItem {
            item_type: self.item_type,
            form: self.form,
            weather_tags: self.weather.into_iter().collect(),
            color: self.color,
            notes: self.notes,
            image_path: String::new(),
        }
    }
}

/// The outfit-generation oracle.
#[async_trait]
pub trait OutfitOracle: Send + Sync {
    fn name(&self) -> &str;

    /// Propose full outfits drawn from `request.candidates`.
    async fn suggest_outfits(&self, request: &OutfitRequest) -> Result<OutfitProposal, OracleError>;

    /// Propose replacements for one slot, given the two fixed slots.
    async fn suggest_alternatives(
        &self,
        request: &SlotRequest,
    ) -> Result<SlotAlternatives, OracleError>;
}

/// The clothing-photo classification oracle.
#[async_trait]
pub trait VisionOracle: Send + Sync {
    fn name(&self) -> &str;

    /// Describe the garment in `image`. `avoid_ids` lists ids already in use.
    async fn classify(
        &self,
        image: &ImageUpload,
        avoid_ids: &[String],
    ) -> Result<ClassifiedItem, OracleError>;
}
