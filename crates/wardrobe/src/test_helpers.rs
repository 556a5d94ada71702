//! Shared stub collaborators for wardrobe tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use fitify_core::error::{CalendarError, OracleError, StorageError, WeatherError};
use fitify_core::{
    CalendarEvent, CalendarProvider, ClassifiedItem, ImageStore, ImageUpload, OutfitGrouping,
    OutfitOracle, OutfitProposal, OutfitRequest, SlotAlternative, SlotAlternatives, SlotRequest,
    VisionOracle, WardrobeItem, WeatherProvider, WeatherReading, WeatherReport,
};
use fitify_core::{WardrobeRepository, WardrobeState};
use fitify_storage::InMemoryRepository;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub fn item(id: &str, item_type: &str) -> WardrobeItem {
    WardrobeItem {
        id: id.into(),
        item_type: item_type.into(),
        form: "cotton".into(),
        weather_tags: Default::default(),
        color: "navy".into(),
        notes: String::new(),
        wear_count: 0,
        image_path: String::new(),
    }
}

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

pub fn mild_report() -> WeatherReport {
    WeatherReport::new(
        "Chicago, US",
        WeatherReading {
            temperature: 68.0,
            conditions: "Clear".into(),
            humidity: 40,
            wind_speed: 5.0,
        },
    )
}

pub fn outfit(items: &[&str]) -> OutfitProposal {
    OutfitProposal {
        outfits: vec![OutfitGrouping {
            name: "Weekday".into(),
            items: items.iter().map(|s| s.to_string()).collect(),
            style_notes: "Simple and clean".into(),
            weather_compatibility: "Good for mild weather".into(),
            formality_level: "casual".into(),
        }],
        recommendations: vec!["Bring a light jacket".into()],
    }
}

pub fn alternatives(ids: &[&str]) -> SlotAlternatives {
    SlotAlternatives {
        alternatives: ids
            .iter()
            .map(|id| SlotAlternative {
                item_id: id.to_string(),
                notes: format!("{id} pairs well"),
            })
            .collect(),
        recommendations: vec![],
    }
}

/// An outfit oracle that replays scripted responses in order.
///
/// Panics if more calls are made than responses provided.
pub struct ScriptedOutfitOracle {
    outfits: Mutex<Vec<Result<OutfitProposal, OracleError>>>,
    alternatives: Mutex<Vec<Result<SlotAlternatives, OracleError>>>,
    outfit_requests: Mutex<Vec<OutfitRequest>>,
    slot_requests: Mutex<Vec<SlotRequest>>,
}

impl ScriptedOutfitOracle {
    pub fn new(
        outfits: Vec<Result<OutfitProposal, OracleError>>,
        alternatives: Vec<Result<SlotAlternatives, OracleError>>,
    ) -> Self {
        Self {
            outfits: Mutex::new(outfits),
            alternatives: Mutex::new(alternatives),
            outfit_requests: Mutex::new(Vec::new()),
            slot_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn outfits(outfits: Vec<OutfitProposal>) -> Self {
        Self::new(outfits.into_iter().map(Ok).collect(), vec![])
    }

    pub fn outfit_requests(&self) -> Vec<OutfitRequest> {
        self.outfit_requests.lock().unwrap().clone()
    }

    pub fn slot_requests(&self) -> Vec<SlotRequest> {
        self.slot_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutfitOracle for ScriptedOutfitOracle {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn suggest_outfits(&self, request: &OutfitRequest) -> Result<OutfitProposal, OracleError> {
        self.outfit_requests.lock().unwrap().push(request.clone());
        let mut queue = self.outfits.lock().unwrap();
        assert!(!queue.is_empty(), "ScriptedOutfitOracle: no more outfit responses");
        queue.remove(0)
    }

    async fn suggest_alternatives(
        &self,
        request: &SlotRequest,
    ) -> Result<SlotAlternatives, OracleError> {
        self.slot_requests.lock().unwrap().push(request.clone());
        let mut queue = self.alternatives.lock().unwrap();
        assert!(!queue.is_empty(), "ScriptedOutfitOracle: no more alternative responses");
        queue.remove(0)
    }
}

/// A vision oracle that always classifies as the same record.
pub struct StubVisionOracle {
    pub classified: ClassifiedItem,
    pub seen_avoid_ids: Mutex<Vec<String>>,
}

impl StubVisionOracle {
    pub fn new(item_type: &str) -> Self {
        Self {
            classified: ClassifiedItem {
                id: "name1".into(),
                item_type: item_type.into(),
                form: "denim".into(),
                weather: vec!["mild".into(), "cool".into()],
                color: "blue".into(),
                notes: "straight leg".into(),
                count: 1,
            },
            seen_avoid_ids: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl VisionOracle for StubVisionOracle {
    fn name(&self) -> &str {
        "stub_vision"
    }

    async fn classify(
        &self,
        _image: &ImageUpload,
        avoid_ids: &[String],
    ) -> Result<ClassifiedItem, OracleError> {
        *self.seen_avoid_ids.lock().unwrap() = avoid_ids.to_vec();
        Ok(self.classified.clone())
    }
}

/// Weather that never changes, or never answers.
pub struct FixedWeather(pub Option<WeatherReport>);

#[async_trait]
impl WeatherProvider for FixedWeather {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn current(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        match &self.0 {
            Some(report) => Ok(WeatherReport {
                location: location.to_string(),
                ..report.clone()
            }),
            None => Err(WeatherError::UnknownLocation(location.to_string())),
        }
    }
}

/// A calendar with a fixed event list, or a fixed failure.
pub struct StaticCalendar(pub Result<Vec<CalendarEvent>, CalendarError>);

#[async_trait]
impl CalendarProvider for StaticCalendar {
    fn name(&self) -> &str {
        "static"
    }

    async fn upcoming_events(&self, _days_ahead: u32) -> Result<Vec<CalendarEvent>, CalendarError> {
        self.0.clone()
    }
}

/// Records saved and removed photos without touching the filesystem.
#[derive(Default)]
pub struct RecordingImageStore {
    pub saved: Mutex<Vec<(String, usize)>>,
    pub removed: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageStore for RecordingImageStore {
    async fn save(&self, item_id: &str, image: &ImageUpload) -> Result<String, StorageError> {
        self.saved
            .lock()
            .unwrap()
            .push((item_id.to_string(), image.bytes.len()));
        Ok(format!("wardrobe/{item_id}{}", image.extension()))
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        self.removed.lock().unwrap().push(path.to_string());
        Ok(())
    }
}

/// In-memory repository whose saves can be made to fail.
#[derive(Clone)]
pub struct FlakyRepository {
    pub inner: InMemoryRepository,
    failing: Arc<AtomicBool>,
}

impl FlakyRepository {
    pub fn with_state(state: WardrobeState) -> Self {
        Self {
            inner: InMemoryRepository::with_state(state),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn fail_saves(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl WardrobeRepository for FlakyRepository {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn load(&self) -> Result<WardrobeState, StorageError> {
        self.inner.load().await
    }

    async fn save(&self, state: &WardrobeState) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                path: "flaky".into(),
                reason: "disk full".into(),
            });
        }
        self.inner.save(state).await
    }
}
