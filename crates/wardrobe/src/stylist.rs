//! The stylist: the outfit workflow over the wardrobe and its collaborators.
//!
//! A full suggestion runs:
//!
//! 1. **Weather** for the location. No weather, no suggestion.
//! 2. **Calendar** for today's formality and athletic windows (optional).
//! 3. **Laundry tick**, returning items whose wash cycle has finished.
//! 4. **Oracle** for a full outfit from the remaining candidates.
//! 5. An extra **athletic** outfit when the calendar has a workout today.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use fitify_config::AppConfig;
use fitify_core::calendar::{CalendarContext, CalendarProvider};
use fitify_core::item::{NewItem, WardrobeItem};
use fitify_core::oracle::{ImageUpload, OutfitOracle, VisionOracle};
use fitify_core::outfit::{Formality, OutfitContext, OutfitLogEntry, Slot};
use fitify_core::repository::ImageStore;
use fitify_core::weather::{WeatherProvider, WeatherReport};
use fitify_core::Result;
use serde::Serialize;
use tracing::{info, warn};

use crate::calendar::CalendarRules;
use crate::laundry::TickOutcome;
use crate::session::{ProposedOutfit, SwapOutcome};
use crate::wardrobe::Wardrobe;

/// Activity used when the caller names none.
pub const DEFAULT_ACTIVITY: &str = "school";

/// Caller overrides for a suggestion. Anything left `None` falls back to
/// configuration or the calendar.
#[derive(Debug, Clone, Default)]
pub struct SuggestRequest {
    pub location: Option<String>,
    pub formality: Option<Formality>,
    pub activity: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub outfit: ProposedOutfit,
    pub weather: WeatherReport,
    pub calendar: CalendarContext,

    /// Items that came back from the laundry on this request's tick
    pub returned_from_laundry: Vec<String>,

    /// Informational outfit for today's athletic events; not part of the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub athletic: Option<ProposedOutfit>,
}

struct CalendarSource {
    provider: Arc<dyn CalendarProvider>,
    rules: CalendarRules,
    lookahead_days: u32,
}

pub struct Stylist {
    wardrobe: Wardrobe,
    outfit_oracle: Arc<dyn OutfitOracle>,
    vision_oracle: Arc<dyn VisionOracle>,
    weather: Arc<dyn WeatherProvider>,
    images: Arc<dyn ImageStore>,
    calendar: Option<CalendarSource>,
    default_location: String,
}

impl Stylist {
    pub fn new(
        wardrobe: Wardrobe,
        outfit_oracle: Arc<dyn OutfitOracle>,
        vision_oracle: Arc<dyn VisionOracle>,
        weather: Arc<dyn WeatherProvider>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            wardrobe,
            outfit_oracle,
            vision_oracle,
            weather,
            images,
            calendar: None,
            default_location: "Chicago, US".into(),
        }
    }

    /// Derive formality and athletic windows from `provider`.
    pub fn with_calendar(
        mut self,
        provider: Arc<dyn CalendarProvider>,
        rules: CalendarRules,
        lookahead_days: u32,
    ) -> Self {
        self.calendar = Some(CalendarSource {
            provider,
            rules,
            lookahead_days,
        });
        self
    }

    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = location.into();
        self
    }

    /// Apply the location and calendar settings from configuration.
    pub fn configured(self, config: &AppConfig, calendar: Option<Arc<dyn CalendarProvider>>) -> Self {
        let stylist = self.with_default_location(config.weather.default_location.clone());
        match calendar {
            Some(provider) => stylist.with_calendar(
                provider,
                CalendarRules::from_config(&config.calendar),
                config.calendar.lookahead_days,
            ),
            None => stylist,
        }
    }

    pub fn wardrobe(&self) -> &Wardrobe {
        &self.wardrobe
    }

    pub fn default_location(&self) -> &str {
        &self.default_location
    }

    // ── Items ──

    pub fn items(&self) -> &[WardrobeItem] {
        self.wardrobe.store().list()
    }

    pub async fn add_item(&mut self, item: NewItem) -> Result<WardrobeItem> {
        self.wardrobe.add_item(item).await
    }

    pub async fn remove_item(&mut self, id: &str) -> Result<WardrobeItem> {
        self.wardrobe.remove_item(id).await
    }

    /// Classify a photo, add the item it shows, and keep the photo.
    ///
    /// The oracle's suggested id is ignored. A classification that maps to
    /// no category rejects the add and the photo is not saved. If the item
    /// cannot be stored, the saved photo is deleted again.
    pub async fn identify_and_add(&mut self, image: ImageUpload) -> Result<WardrobeItem> {
        let avoid = self.wardrobe.all_ids();
        let classified = self.vision_oracle.classify(&image, &avoid).await?;
        info!(
            oracle = self.vision_oracle.name(),
            item_type = %classified.item_type,
            color = %classified.color,
            "Photo classified"
        );

        let mut item = classified.into_new_item();
        let id = self.wardrobe.next_id(&item)?;
        let path = self.images.save(&id, &image).await?;
        item.image_path = path.clone();

        match self.wardrobe.add_item(item).await {
            Ok(added) => Ok(added),
            Err(e) => {
                if let Err(cleanup) = self.images.remove(&path).await {
                    warn!(path = %path, error = %cleanup, "Failed to remove orphaned photo");
                }
                Err(e)
            }
        }
    }

    // ── Laundry ──

    pub async fn tick_laundry(&mut self) -> Result<TickOutcome> {
        self.wardrobe.tick().await
    }

    // ── Outfits ──

    pub async fn suggest(&mut self, request: SuggestRequest) -> Result<Suggestion> {
        self.suggest_on(request, Local::now().date_naive()).await
    }

    /// Run the full suggestion workflow as of `today`.
    pub async fn suggest_on(&mut self, request: SuggestRequest, today: NaiveDate) -> Result<Suggestion> {
        let location = request
            .location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| self.default_location.clone());
        let weather = self.weather.current(&location).await?;

        let calendar = self.calendar_context(today).await;
        let formality = request.formality.unwrap_or(calendar.formality);
        let activity = request
            .activity
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ACTIVITY.to_string());

        let tick = self.wardrobe.tick().await?;

        let context = OutfitContext {
            weather: weather.clone(),
            formality,
            activity,
        };
        let outfit = self
            .wardrobe
            .generate(self.outfit_oracle.as_ref(), context.clone())
            .await?;

        let athletic = if calendar.activities.is_empty() {
            None
        } else {
            let athletic_context = OutfitContext {
                activity: "athletic".into(),
                ..context
            };
            match self
                .wardrobe
                .preview(self.outfit_oracle.as_ref(), athletic_context)
                .await
            {
                Ok(outfit) => Some(outfit),
                Err(e) => {
                    warn!("Athletic outfit unavailable: {e}");
                    None
                }
            }
        };

        Ok(Suggestion {
            outfit,
            weather,
            calendar,
            returned_from_laundry: tick.returned_ids.into_iter().collect(),
            athletic,
        })
    }

    pub fn current(&self) -> Option<&ProposedOutfit> {
        self.wardrobe.current()
    }

    pub async fn swap(&mut self, slot: Slot) -> Result<SwapOutcome> {
        self.wardrobe.swap(self.outfit_oracle.as_ref(), slot).await
    }

    pub async fn accept(&mut self, notes: &str) -> Result<OutfitLogEntry> {
        self.accept_on(Local::now().date_naive(), notes).await
    }

    pub async fn accept_on(&mut self, date: NaiveDate, notes: &str) -> Result<OutfitLogEntry> {
        self.wardrobe.accept(date, notes).await
    }

    pub fn discard(&mut self) {
        self.wardrobe.discard();
    }

    pub fn history(&self, limit: Option<usize>) -> Vec<&OutfitLogEntry> {
        self.wardrobe.recent(limit)
    }

    async fn calendar_context(&self, today: NaiveDate) -> CalendarContext {
        let Some(source) = &self.calendar else {
            return CalendarContext::default();
        };

        match source.provider.upcoming_events(source.lookahead_days).await {
            Ok(events) => source.rules.derive(&events, today),
            Err(e) => {
                warn!(provider = source.provider.name(), "Calendar unavailable, assuming casual: {e}");
                CalendarContext::default()
            }
        }
    }
}
