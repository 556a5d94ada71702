//! Collaborator assembly from configuration.

use std::sync::Arc;

use fitify_config::AppConfig;
use fitify_core::calendar::CalendarProvider;
use fitify_core::oracle::{OutfitOracle, VisionOracle};
use fitify_core::weather::WeatherProvider;
use tracing::{info, warn};

use crate::calendar::GoogleCalendarProvider;
use crate::chat::ChatOracle;
use crate::weather::{MockWeatherProvider, OpenWeatherMapProvider};

/// Everything a stylist talks to besides its own storage.
pub struct Collaborators {
    pub outfit_oracle: Arc<dyn OutfitOracle>,
    pub vision_oracle: Arc<dyn VisionOracle>,
    pub weather: Arc<dyn WeatherProvider>,
    pub calendar: Option<Arc<dyn CalendarProvider>>,
}

/// Build the collaborators named by `config`.
///
/// Missing API keys are not an error here; the affected collaborator fails
/// when it is first called, so item management keeps working offline.
pub fn build_from_config(config: &AppConfig) -> fitify_core::Result<Collaborators> {
    let oracle = Arc::new(ChatOracle::from_config(config)?);

    let weather: Arc<dyn WeatherProvider> = match config.weather.provider.as_str() {
        "mock" => Arc::new(MockWeatherProvider),
        "openweathermap" => Arc::new(OpenWeatherMapProvider::new(
            config.weather.api_key.clone().unwrap_or_default(),
        )?),
        other => {
            return Err(fitify_core::Error::Config {
                message: format!("unknown weather provider '{other}'"),
            });
        }
    };

    let calendar: Option<Arc<dyn CalendarProvider>> =
        match GoogleCalendarProvider::from_config(&config.calendar) {
            Some(provider) => Some(Arc::new(provider?)),
            None => {
                if config.calendar.enabled {
                    warn!("Calendar enabled without an access token, continuing without it");
                }
                None
            }
        };

    info!(
        oracle = %config.oracle.provider,
        weather = weather.name(),
        calendar = calendar.is_some(),
        "Collaborators ready"
    );

    Ok(Collaborators {
        outfit_oracle: oracle.clone(),
        vision_oracle: oracle,
        weather,
        calendar,
    })
}
