//! Calendar provider trait and the context it contributes to a suggestion.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::outfit::Formality;

/// A calendar event in the lookahead window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub start: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<FixedOffset>>,
}

/// An athletic event today that warrants its own outfit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleticWindow {
    /// Local start time, `HH:MM`
    pub time: String,
    /// e.g. `1h`, `45m`, `1h30m`
    pub duration: String,
}

/// What the calendar says about today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarContext {
    pub formality: Formality,
    #[serde(default)]
    pub activities: Vec<AthleticWindow>,
}

/// The calendar provider trait.
///
/// Optional: with no provider configured the planner uses
/// `CalendarContext::default()` (casual, no activities).
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Events starting within the next `days_ahead` days.
    async fn upcoming_events(&self, days_ahead: u32) -> Result<Vec<CalendarEvent>, CalendarError>;
}
