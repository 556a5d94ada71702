//! Oracle response parsing.
//!
//! Model output is JSON, often wrapped in a markdown code fence. Anything that
//! still fails to parse after the fence is stripped degrades to a fixed
//! fallback value; a [`MalformedResponse`] never leaves this crate.

use fitify_core::oracle::{
    ClassifiedItem, OutfitGrouping, OutfitProposal, SlotAlternative, SlotAlternatives,
};
use fitify_core::outfit::Slot;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Model output that isn't the structure we asked for.
#[derive(Debug, thiserror::Error)]
#[error("Malformed oracle response: {reason}")]
pub struct MalformedResponse {
    pub reason: String,
}

/// Strip a surrounding markdown code fence and whitespace.
///
/// A leading ```` ```json ```` is removed, then a leading ```` ``` ````, then
/// a trailing ```` ``` ````.
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    }
    if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

pub fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, MalformedResponse> {
    serde_json::from_str(strip_fences(raw)).map_err(|e| MalformedResponse {
        reason: e.to_string(),
    })
}

/// Full-outfit response; falls back to [`fallback_outfit`].
pub fn outfit_proposal(raw: &str) -> OutfitProposal {
    parse_json(raw).unwrap_or_else(|e| {
        warn!(raw = %raw, "{e}, using placeholder outfit");
        fallback_outfit()
    })
}

/// Single-slot response; falls back to [`fallback_alternatives`].
pub fn slot_alternatives(raw: &str, slot: Slot) -> SlotAlternatives {
    parse_alternatives(raw, slot).unwrap_or_else(|e| {
        warn!(raw = %raw, slot = %slot, "{e}, using placeholder alternative");
        fallback_alternatives()
    })
}

/// Vision classification; falls back to [`ClassifiedItem::fallback`].
pub fn classified_item(raw: &str) -> ClassifiedItem {
    parse_json(raw).unwrap_or_else(|e| {
        warn!(raw = %raw, "{e}, using placeholder classification");
        ClassifiedItem::fallback()
    })
}

#[derive(Deserialize)]
struct WireAlternative {
    item_id: String,
    #[serde(default)]
    compatibility_notes: String,
    #[serde(default)]
    style_notes: String,
    #[serde(default)]
    notes: String,
}

impl WireAlternative {
    fn into_alternative(self) -> SlotAlternative {
        let notes = [self.compatibility_notes, self.style_notes, self.notes]
            .into_iter()
            .filter(|n| !n.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        SlotAlternative {
            item_id: self.item_id,
            notes,
        }
    }
}

/// The list lives under the slot's plural (`tops`, `bottoms`, `shoes`) or
/// under `alternatives`.
fn parse_alternatives(raw: &str, slot: Slot) -> Result<SlotAlternatives, MalformedResponse> {
    let value: serde_json::Value = parse_json(raw)?;
    let list = value
        .get(slot.plural())
        .or_else(|| value.get("alternatives"))
        .cloned()
        .ok_or_else(|| MalformedResponse {
            reason: format!("missing '{}' list", slot.plural()),
        })?;

    let wire: Vec<WireAlternative> =
        serde_json::from_value(list).map_err(|e| MalformedResponse {
            reason: e.to_string(),
        })?;
    let recommendations: Vec<String> = value
        .get("recommendations")
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| MalformedResponse {
            reason: e.to_string(),
        })?
        .unwrap_or_default();

    Ok(SlotAlternatives {
        alternatives: wire.into_iter().map(WireAlternative::into_alternative).collect(),
        recommendations,
    })
}

pub fn fallback_outfit() -> OutfitProposal {
    OutfitProposal {
        outfits: vec![OutfitGrouping {
            name: "Default Casual Outfit".into(),
            items: vec!["item_id1".into(), "item_id2".into(), "item_id3".into()],
            style_notes: "Basic casual outfit".into(),
            weather_compatibility: "Suitable for mild weather".into(),
            formality_level: "casual".into(),
        }],
        recommendations: vec![
            "Check the weather forecast for more specific recommendations".into(),
            "Consider your activity level when choosing layers".into(),
            "Make sure your shoes are appropriate for the weather conditions".into(),
        ],
    }
}

/// A single placeholder id that never names a real item, so a swap built on
/// it reports no alternative.
pub fn fallback_alternatives() -> SlotAlternatives {
    SlotAlternatives {
        alternatives: vec![SlotAlternative {
            item_id: "item_id".into(),
            notes: "No suggestion available".into(),
        }],
        recommendations: vec![],
    }
}
