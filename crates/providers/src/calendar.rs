//! Google Calendar events provider.
//!
//! Takes an already-issued OAuth access token; obtaining and refreshing the
//! token is left to the user's tooling.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, SecondsFormat, Utc};
use fitify_config::CalendarConfig;
use fitify_core::calendar::{CalendarEvent, CalendarProvider};
use fitify_core::error::CalendarError;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub struct GoogleCalendarProvider {
    base_url: String,
    access_token: String,
    calendar_id: String,
    client: reqwest::Client,
}

impl GoogleCalendarProvider {
    pub fn new(
        access_token: impl Into<String>,
        calendar_id: impl Into<String>,
    ) -> Result<Self, CalendarError> {
        Self::with_base_url(
            access_token,
            calendar_id,
            "https://www.googleapis.com/calendar/v3",
        )
    }

    pub fn with_base_url(
        access_token: impl Into<String>,
        calendar_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, CalendarError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| CalendarError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            calendar_id: calendar_id.into(),
            client,
        })
    }

    /// `None` when the calendar is disabled or has no token.
    pub fn from_config(config: &CalendarConfig) -> Option<Result<Self, CalendarError>> {
        let token = config.access_token.as_deref().filter(|t| !t.is_empty());
        match (config.enabled, token) {
            (true, Some(token)) => Some(Self::new(token, &config.calendar_id)),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<ApiEvent>,
}

#[derive(Deserialize)]
struct ApiEvent {
    #[serde(default)]
    summary: String,
    start: ApiTime,
    #[serde(default)]
    end: Option<ApiTime>,
}

/// Timed events carry `dateTime`; all-day events only `date`.
#[derive(Deserialize)]
struct ApiTime {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
}

impl ApiTime {
    fn parse(&self) -> Option<DateTime<chrono::FixedOffset>> {
        self.date_time
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendarProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn upcoming_events(&self, days_ahead: u32) -> Result<Vec<CalendarEvent>, CalendarError> {
        let now = Utc::now();
        let until = now + ChronoDuration::days(i64::from(days_ahead.max(1)));
        let url = format!(
            "{}/calendars/{}/events",
            self.base_url,
            self.calendar_id.replace('#', "%23")
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("timeMin", now.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("timeMax", until.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ])
            .send()
            .await
            .map_err(|e| CalendarError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(CalendarError::Request(format!("status {status}")));
        }

        let list: EventList = response
            .json()
            .await
            .map_err(|e| CalendarError::Request(format!("Failed to parse events: {e}")))?;

        let events: Vec<CalendarEvent> = list
            .items
            .into_iter()
            .filter_map(|e| {
                let Some(start) = e.start.parse() else {
                    debug!(summary = %e.summary, "Skipping all-day event");
                    return None;
                };
                Some(CalendarEvent {
                    summary: e.summary,
                    start,
                    end: e.end.as_ref().and_then(ApiTime::parse),
                })
            })
            .collect();

        debug!(count = events.len(), days_ahead, "Calendar events fetched");
        Ok(events)
    }
}
