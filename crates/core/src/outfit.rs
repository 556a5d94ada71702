//! Outfit domain types: slots, request context, and the history log entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::WardrobeError;
use crate::item::Category;
use crate::weather::{WeatherReading, WeatherReport};

/// One of the three outfit positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Top,
    Bottom,
    Shoes,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Top, Slot::Bottom, Slot::Shoes];

    /// The item category allowed in this slot.
    pub fn category(self) -> Category {
        match self {
            Slot::Top => Category::Top,
            Slot::Bottom => Category::Bottom,
            Slot::Shoes => Category::Shoe,
        }
    }

    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Top => Slot::Top,
            Category::Bottom => Slot::Bottom,
            Category::Shoe => Slot::Shoes,
        }
    }

    /// Plural key used in oracle payloads ("tops", "bottoms", "shoes").
    pub fn plural(self) -> &'static str {
        match self {
            Slot::Top => "tops",
            Slot::Bottom => "bottoms",
            Slot::Shoes => "shoes",
        }
    }

    /// The two slots held fixed while this one is swapped.
    pub fn others(self) -> [Slot; 2] {
        match self {
            Slot::Top => [Slot::Bottom, Slot::Shoes],
            Slot::Bottom => [Slot::Top, Slot::Shoes],
            Slot::Shoes => [Slot::Top, Slot::Bottom],
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Slot::Top => "top",
            Slot::Bottom => "bottom",
            Slot::Shoes => "shoes",
        })
    }
}

impl std::str::FromStr for Slot {
    type Err = WardrobeError;

    /// Accepts names, plurals, and the 1/2/3 menu shortcuts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" | "tops" | "1" => Ok(Slot::Top),
            "bottom" | "bottoms" | "2" => Ok(Slot::Bottom),
            "shoes" | "shoe" | "3" => Ok(Slot::Shoes),
            _ => Err(WardrobeError::InvalidSlot(s.to_string())),
        }
    }
}

/// The working outfit: at most one item id per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitSlots {
    #[serde(default)]
    pub top: Option<String>,
    #[serde(default)]
    pub bottom: Option<String>,
    #[serde(default)]
    pub shoes: Option<String>,
}

impl OutfitSlots {
    pub fn get(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Top => self.top.as_deref(),
            Slot::Bottom => self.bottom.as_deref(),
            Slot::Shoes => self.shoes.as_deref(),
        }
    }

    pub fn set(&mut self, slot: Slot, id: Option<String>) {
        match slot {
            Slot::Top => self.top = id,
            Slot::Bottom => self.bottom = id,
            Slot::Shoes => self.shoes = id,
        }
    }

    /// Every slot is filled.
    pub fn is_complete(&self) -> bool {
        Slot::ALL.iter().all(|s| self.get(*s).is_some())
    }

    /// Slots with nothing in them, in top, bottom, shoes order.
    pub fn missing(&self) -> Vec<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|s| self.get(*s).is_none())
            .collect()
    }

    /// No slot is filled.
    pub fn is_empty(&self) -> bool {
        Slot::ALL.iter().all(|s| self.get(*s).is_none())
    }

    /// Filled slots in top, bottom, shoes order.
    pub fn filled(&self) -> impl Iterator<Item = (Slot, &str)> {
        Slot::ALL
            .into_iter()
            .filter_map(move |s| self.get(s).map(|id| (s, id)))
    }
}

/// How dressed-up the outfit should be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formality {
    #[default]
    Casual,
    Formal,
}

impl std::fmt::Display for Formality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Formality::Casual => "casual",
            Formality::Formal => "formal",
        })
    }
}

impl std::str::FromStr for Formality {
    type Err = WardrobeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "casual" => Ok(Formality::Casual),
            "formal" => Ok(Formality::Formal),
            _ => Err(WardrobeError::InvalidFormality(s.to_string())),
        }
    }
}

/// Everything the oracle is told about the occasion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutfitContext {
    pub weather: WeatherReport,
    pub formality: Formality,
    pub activity: String,
}

/// A finalized outfit. Immutable once appended to the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitLogEntry {
    pub id: String,
    pub date: NaiveDate,
    pub slots: OutfitSlots,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherReading>,
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub formality: Formality,
    #[serde(default)]
    pub notes: String,
}

impl OutfitLogEntry {
    pub fn new(
        date: NaiveDate,
        slots: OutfitSlots,
        weather: Option<WeatherReading>,
        activity: impl Into<String>,
        formality: Formality,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            slots,
            weather,
            activity: activity.into(),
            formality,
            notes: notes.into(),
        }
    }
}
