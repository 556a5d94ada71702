//! Wardrobe items and the clothing category table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::WardrobeError;

/// The coarse category of a garment. Each category owns one id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Shoe,
}

const TOP_TYPES: &[&str] = &[
    "top", "shirt", "t-shirt", "tshirt", "tee", "blouse", "polo", "sweater", "sweatshirt",
    "hoodie", "cardigan", "jacket", "coat", "parka", "outerwear",
];

const BOTTOM_TYPES: &[&str] = &[
    "bottom", "pants", "jeans", "trousers", "chinos", "shorts", "skirt", "leggings", "joggers",
];

const SHOE_TYPES: &[&str] = &[
    "shoe", "shoes", "sneakers", "boots", "sandals", "loafers", "heels",
];

impl Category {
    pub const ALL: [Category; 3] = [Category::Top, Category::Bottom, Category::Shoe];

    /// The id prefix used for items of this category.
    pub fn prefix(self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Shoe => "shoe",
        }
    }

    /// Map a free-text garment type ("T-Shirt", "jeans", "sneakers") to its category.
    ///
    /// The type is trimmed, lowercased, and `_`/space are folded to `-` before
    /// lookup in the fixed table.
    pub fn from_declared_type(declared: &str) -> Result<Self, WardrobeError> {
        let normalized: String = declared
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c })
            .collect();

        if TOP_TYPES.contains(&normalized.as_str()) {
            Ok(Category::Top)
        } else if BOTTOM_TYPES.contains(&normalized.as_str()) {
            Ok(Category::Bottom)
        } else if SHOE_TYPES.contains(&normalized.as_str()) {
            Ok(Category::Shoe)
        } else {
            Err(WardrobeError::UnknownCategory {
                declared: declared.to_string(),
            })
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A single garment in the user's wardrobe.
///
/// The JSON field names match the on-disk wardrobe format (`type`, `weather`,
/// `count`, `image`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardrobeItem {
    /// `<prefix><n>`, unique across the item store and the laundry set
    pub id: String,

    /// Declared garment type, e.g. "t-shirt", "jeans", "shoes"
    #[serde(rename = "type")]
    pub item_type: String,

    /// Material or cut, e.g. "denim", "cotton", "leather"
    #[serde(default)]
    pub form: String,

    /// Weather the item suits, e.g. "warm", "rainy"
    #[serde(rename = "weather", default)]
    pub weather_tags: BTreeSet<String>,

    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub notes: String,

    /// Laundry ticks survived since the item was last worn
    #[serde(rename = "count", default)]
    pub wear_count: u32,

    /// Where the item's photo is stored (empty if none)
    #[serde(rename = "image", default)]
    pub image_path: String,
}

impl WardrobeItem {
    /// The category of this item, if its declared type is known.
    pub fn category(&self) -> Option<Category> {
        Category::from_declared_type(&self.item_type).ok()
    }
}

/// An item description before an id has been assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(rename = "type")]
    pub item_type: String,

    #[serde(default)]
    pub form: String,

    #[serde(rename = "weather", default)]
    pub weather_tags: BTreeSet<String>,

    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub notes: String,

    #[serde(rename = "image", default)]
    pub image_path: String,
}

impl NewItem {
    /// Finalize into a stored item under the given id.
    pub fn into_item(self, id: String) -> WardrobeItem {
        WardrobeItem {
            id,
            item_type: self.item_type,
            form: self.form,
            weather_tags: self.weather_tags,
            color: self.color,
            notes: self.notes,
            wear_count: 0,
            image_path: self.image_path,
        }
    }
}
