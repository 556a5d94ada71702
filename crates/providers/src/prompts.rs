//! Prompt construction for the outfit and vision oracles.

use fitify_core::item::WardrobeItem;
use fitify_core::oracle::{OutfitRequest, SlotRequest};
use fitify_core::outfit::{OutfitContext, Slot};

pub const STYLIST_SYSTEM: &str = "You are an expert at creating stylish and appropriate outfit \
combinations. You understand how to match different clothing items, consider weather conditions, \
and maintain a good balance of style and comfort. You answer with JSON only.";

fn items_json(items: &[WardrobeItem]) -> String {
    serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".into())
}

fn describe_context(context: &OutfitContext) -> String {
    let w = &context.weather;
    format!(
        "Weather in {location}: {temp:.0}°F, {conditions}, humidity {humidity}%, wind {wind:.0} mph\n\
         Temperature category: {category}\n\
         Conditions: {tags}\n\
         Clothing guidance: {guidance}\n\
         Formality: {formality}\n\
         Activity: {activity}",
        location = w.location,
        temp = w.reading.temperature,
        conditions = w.reading.conditions,
        humidity = w.reading.humidity,
        wind = w.reading.wind_speed,
        category = w.analysis.temperature_category,
        tags = w.analysis.weather_conditions.join(", "),
        guidance = w.analysis.clothing_recommendations.join("; "),
        formality = context.formality,
        activity = context.activity,
    )
}

pub fn outfit_prompt(request: &OutfitRequest) -> String {
    format!(
        r#"Create an outfit that includes EXACTLY one top, one bottom, and one pair of shoes.
You can ONLY use items listed under Available Items. Each item id in your response MUST match an id from that list exactly.

{context}

Available Items:
{items}

Return outfit suggestions in this JSON format:
{{
    "outfits": [
        {{
            "name": "outfit name",
            "items": ["top id", "bottom id", "shoe id"],
            "style_notes": "style notes",
            "weather_compatibility": "why it suits the weather",
            "formality_level": "casual or formal"
        }}
    ],
    "recommendations": ["recommendation1", "recommendation2"]
}}"#,
        context = describe_context(&request.context),
        items = items_json(&request.candidates),
    )
}

fn slot_noun(slot: Slot) -> &'static str {
    match slot {
        Slot::Top => "top",
        Slot::Bottom => "bottom",
        Slot::Shoes => "pair of shoes",
    }
}

pub fn slot_prompt(request: &SlotRequest) -> String {
    let key = request.slot.plural();
    let current = match &request.current {
        Some(item) => format!(
            "The user rejected the current {} ({}). Do NOT suggest it again.",
            slot_noun(request.slot),
            item.id
        ),
        None => String::new(),
    };

    format!(
        r#"Suggest a different {noun} while keeping the rest of the outfit exactly as it is.
{current}

Keep these items:
{fixed}

{context}

Available Items (only choose {key} that match the items being kept):
{items}

Return only new suggestions in this JSON format:
{{
    "{key}": [
        {{
            "item_id": "item id",
            "compatibility_notes": "how well it matches the kept items",
            "style_notes": "additional style notes"
        }}
    ],
    "recommendations": ["recommendation1", "recommendation2"]
}}"#,
        noun = slot_noun(request.slot),
        fixed = items_json(&request.fixed),
        context = describe_context(&request.context),
        items = items_json(&request.candidates),
    )
}

pub fn vision_prompt(avoid_ids: &[String]) -> String {
    format!(
        r#"Describe the clothing item in the image in the following JSON format:
{{
    "id": "name1",
    "type": "type (t-shirt, shirt, sweater, jacket, pants, jeans, shorts, skirt, shoes, sneakers, boots)",
    "form": "material or cut (denim, cotton, chinos, leather, ...)",
    "weather": ["warm", "hot"] (any of: cold, cool, mild, warm, hot, rainy, snowy, windy, sunny),
    "color": "specific color of the item",
    "notes": "notes about the item",
    "count": 1
}}

Do not include any additional text or explanations, just the JSON object.
Do not make the id the same as any of the following:
{ids}"#,
        ids = avoid_ids.join("\n"),
    )
}
