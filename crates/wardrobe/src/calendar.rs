//! Calendar-derived outfit context.
//!
//! Today's events set the default formality and flag athletic windows.
//! Matching is a case-insensitive substring test against the event summary.

use chrono::NaiveDate;
use fitify_config::CalendarConfig;
use fitify_core::calendar::{AthleticWindow, CalendarContext, CalendarEvent};
use fitify_core::outfit::Formality;
use tracing::debug;

const DEFAULT_DURATION: &str = "1h";

#[derive(Debug, Clone)]
pub struct CalendarRules {
    formal_keywords: Vec<String>,
    athletic_keywords: Vec<String>,
}

impl Default for CalendarRules {
    fn default() -> Self {
        Self::new(
            ["meeting", "interview", "competition", "presentation"],
            ["practice", "training", "workout", "gym"],
        )
    }
}

impl CalendarRules {
    pub fn new<F, A>(formal: F, athletic: A) -> Self
    where
        F: IntoIterator,
        F::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            formal_keywords: formal.into_iter().map(|k| k.as_ref().to_lowercase()).collect(),
            athletic_keywords: athletic
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &CalendarConfig) -> Self {
        Self::new(&config.formal_keywords, &config.athletic_keywords)
    }

    /// Derive formality and athletic windows from the events starting on `today`.
    pub fn derive(&self, events: &[CalendarEvent], today: NaiveDate) -> CalendarContext {
        let mut context = CalendarContext::default();

        for event in events.iter().filter(|e| e.start.date_naive() == today) {
            let summary = event.summary.to_lowercase();

            if self.formal_keywords.iter().any(|k| summary.contains(k.as_str())) {
                context.formality = Formality::Formal;
            }

            if self.athletic_keywords.iter().any(|k| summary.contains(k.as_str())) {
                let window = AthleticWindow {
                    time: event.start.format("%H:%M").to_string(),
                    duration: duration_label(event),
                };
                debug!(summary = %event.summary, time = %window.time, "Athletic event today");
                context.activities.push(window);
            }
        }

        context
    }
}

fn duration_label(event: &CalendarEvent) -> String {
    let Some(end) = event.end else {
        return DEFAULT_DURATION.to_string();
    };
    let minutes = (end - event.start).num_minutes();
    if minutes <= 0 {
        return DEFAULT_DURATION.to_string();
    }

    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h{m}m"),
    }
}
