//! Wardrobe REST API.
//!
//! Endpoints:
//!
//! - `GET    /items`               List wearable items
//! - `POST   /items`               Add an item from a description
//! - `DELETE /items/{id}`          Remove an item
//! - `POST   /items/identify`      Classify a base64 photo and add the item
//! - `GET    /laundry`             Items in the wash
//! - `POST   /laundry/tick`        Advance the laundry by one refresh
//! - `GET    /suggest_outfit`      Full suggestion (`location`, `formality`, `activity`)
//! - `GET    /outfit`              The outfit currently proposed
//! - `POST   /outfit/swap`         Replace one slot (`{"slot": "top"}`)
//! - `POST   /outfit/accept`       Wear the proposed outfit (`{"notes": "..."}`)
//! - `GET    /outfit_history`      Accepted outfits, newest first (`limit`)
//!
//! Outfit bodies carry `complete` and `missing` so clients can steer the user
//! to a swap before offering acceptance.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use fitify_core::item::{NewItem, WardrobeItem};
use fitify_core::oracle::ImageUpload;
use fitify_core::outfit::{Formality, OutfitLogEntry, Slot};
use fitify_core::calendar::CalendarContext;
use fitify_core::weather::WeatherReport;
use fitify_wardrobe::{ProposedOutfit, SuggestRequest, SwapOutcome};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::SharedState;
use crate::error::ApiError;

type ApiResult<T> = Result<T, ApiError>;

pub fn api_router(state: SharedState) -> Router {
    Router::new()
        .route("/items", get(list_items_handler).post(add_item_handler))
        .route("/items/identify", post(identify_item_handler))
        .route("/items/{id}", delete(remove_item_handler))
        .route("/laundry", get(laundry_handler))
        .route("/laundry/tick", post(laundry_tick_handler))
        .route("/suggest_outfit", get(suggest_handler))
        .route("/outfit", get(current_outfit_handler))
        .route("/outfit/swap", post(swap_handler))
        .route("/outfit/accept", post(accept_handler))
        .route("/outfit_history", get(history_handler))
        .with_state(state)
}

// ── Items ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ItemListResponse {
    items: Vec<WardrobeItem>,
}

async fn list_items_handler(State(state): State<SharedState>) -> Json<ItemListResponse> {
    let stylist = state.stylist.lock().await;
    Json(ItemListResponse {
        items: stylist.items().to_vec(),
    })
}

async fn add_item_handler(
    State(state): State<SharedState>,
    Json(item): Json<NewItem>,
) -> ApiResult<(StatusCode, Json<WardrobeItem>)> {
    let mut stylist = state.stylist.lock().await;
    let added = stylist.add_item(item).await?;
    info!(item_id = %added.id, "Item added via API");
    Ok((StatusCode::CREATED, Json(added)))
}

async fn remove_item_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<WardrobeItem>> {
    let mut stylist = state.stylist.lock().await;
    Ok(Json(stylist.remove_item(&id).await?))
}

#[derive(Deserialize)]
struct IdentifyRequest {
    /// Base64 photo, optionally as a `data:` URL
    image: String,
    #[serde(default)]
    file_name: Option<String>,
}

fn decode_image(request: IdentifyRequest) -> ApiResult<ImageUpload> {
    let encoded = match request.image.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => request.image.as_str(),
    };
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| ApiError::BadRequest(format!("Invalid base64 image: {e}")))?;
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("Empty image".into()));
    }
    Ok(ImageUpload::new(
        bytes,
        request.file_name.unwrap_or_else(|| "upload.png".into()),
    ))
}

async fn identify_item_handler(
    State(state): State<SharedState>,
    Json(request): Json<IdentifyRequest>,
) -> ApiResult<(StatusCode, Json<WardrobeItem>)> {
    let image = decode_image(request)?;
    let mut stylist = state.stylist.lock().await;
    let added = stylist.identify_and_add(image).await?;
    Ok((StatusCode::CREATED, Json(added)))
}

// ── Laundry ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct LaundryResponse {
    cycle_threshold: u32,
    items: Vec<WardrobeItem>,
}

async fn laundry_handler(State(state): State<SharedState>) -> Json<LaundryResponse> {
    let stylist = state.stylist.lock().await;
    let laundry = stylist.wardrobe().laundry();
    Json(LaundryResponse {
        cycle_threshold: laundry.threshold(),
        items: laundry.entries().to_vec(),
    })
}

#[derive(Serialize)]
struct TickResponse {
    returned: Vec<String>,
    still_in_laundry: usize,
}

async fn laundry_tick_handler(State(state): State<SharedState>) -> ApiResult<Json<TickResponse>> {
    let mut stylist = state.stylist.lock().await;
    let outcome = stylist.tick_laundry().await?;
    Ok(Json(TickResponse {
        returned: outcome.returned_ids.into_iter().collect(),
        still_in_laundry: stylist.wardrobe().laundry().len(),
    }))
}

// ── Outfits ───────────────────────────────────────────────────────────────

/// A proposed outfit plus whether every slot is filled.
#[derive(Serialize)]
struct OutfitView {
    #[serde(flatten)]
    outfit: ProposedOutfit,
    complete: bool,
    missing: Vec<Slot>,
}

impl From<ProposedOutfit> for OutfitView {
    fn from(outfit: ProposedOutfit) -> Self {
        Self {
            complete: outfit.is_complete(),
            missing: outfit.missing(),
            outfit,
        }
    }
}

#[derive(Serialize)]
struct SuggestResponse {
    outfit: OutfitView,
    weather: WeatherReport,
    calendar: CalendarContext,
    returned_from_laundry: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    athletic: Option<ProposedOutfit>,
}

#[derive(Deserialize)]
struct SuggestQuery {
    location: Option<String>,
    formality: Option<String>,
    activity: Option<String>,
}

async fn suggest_handler(
    State(state): State<SharedState>,
    Query(query): Query<SuggestQuery>,
) -> ApiResult<Json<SuggestResponse>> {
    let formality = query
        .formality
        .filter(|f| !f.trim().is_empty())
        .map(|f| f.parse::<Formality>())
        .transpose()?;

    let mut stylist = state.stylist.lock().await;
    let suggestion = stylist
        .suggest(SuggestRequest {
            location: query.location,
            formality,
            activity: query.activity,
        })
        .await?;
    Ok(Json(SuggestResponse {
        outfit: suggestion.outfit.into(),
        weather: suggestion.weather,
        calendar: suggestion.calendar,
        returned_from_laundry: suggestion.returned_from_laundry,
        athletic: suggestion.athletic,
    }))
}

async fn current_outfit_handler(
    State(state): State<SharedState>,
) -> ApiResult<Json<OutfitView>> {
    let stylist = state.stylist.lock().await;
    stylist
        .current()
        .cloned()
        .map(|outfit| Json(outfit.into()))
        .ok_or_else(|| fitify_core::error::WardrobeError::NoActiveOutfit.into())
}

#[derive(Deserialize)]
struct SwapRequest {
    slot: String,
}

#[derive(Serialize)]
struct SwapResponse {
    swap: SwapOutcome,
    outfit: Option<OutfitView>,
}

async fn swap_handler(
    State(state): State<SharedState>,
    Json(request): Json<SwapRequest>,
) -> ApiResult<Json<SwapResponse>> {
    let slot: Slot = request.slot.parse()?;
    let mut stylist = state.stylist.lock().await;
    let swap = stylist.swap(slot).await?;
    Ok(Json(SwapResponse {
        swap,
        outfit: stylist.current().cloned().map(OutfitView::from),
    }))
}

#[derive(Deserialize)]
struct AcceptRequest {
    #[serde(default)]
    notes: String,
}

async fn accept_handler(
    State(state): State<SharedState>,
    body: Option<Json<AcceptRequest>>,
) -> ApiResult<Json<OutfitLogEntry>> {
    let notes = body.map(|Json(r)| r.notes).unwrap_or_default();
    let mut stylist = state.stylist.lock().await;
    let entry = stylist.accept(&notes).await?;
    info!(entry_id = %entry.id, "Outfit accepted via API");
    Ok(Json(entry))
}

#[derive(Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
struct HistoryResponse {
    outfits: Vec<OutfitLogEntry>,
}

async fn history_handler(
    State(state): State<SharedState>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let stylist = state.stylist.lock().await;
    Json(HistoryResponse {
        outfits: stylist.history(query.limit).into_iter().cloned().collect(),
    })
}
