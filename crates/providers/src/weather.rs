//! Weather providers: OpenWeatherMap and a deterministic offline mock.

use async_trait::async_trait;
use fitify_core::error::WeatherError;
use fitify_core::weather::{WeatherProvider, WeatherReading, WeatherReport};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Current conditions from the OpenWeatherMap API, in imperial units.
pub struct OpenWeatherMapProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenWeatherMapProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, "https://api.openweathermap.org/data/2.5")
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| WeatherError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }
}

#[derive(Deserialize)]
struct OwmResponse {
    #[serde(default)]
    weather: Vec<OwmCondition>,
    main: OwmMain,
    #[serde(default)]
    wind: OwmWind,
}

#[derive(Deserialize)]
struct OwmCondition {
    #[serde(default)]
    description: String,
    #[serde(default)]
    main: String,
}

#[derive(Deserialize)]
struct OwmMain {
    temp: f64,
    #[serde(default)]
    humidity: u32,
}

#[derive(Deserialize, Default)]
struct OwmWind {
    #[serde(default)]
    speed: f64,
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapProvider {
    fn name(&self) -> &str {
        "openweathermap"
    }

    async fn current(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        if self.api_key.is_empty() {
            return Err(WeatherError::NotConfigured(
                "no OpenWeatherMap API key (set FITIFY_WEATHER_API_KEY)".into(),
            ));
        }
        if location.trim().is_empty() {
            return Err(WeatherError::UnknownLocation(location.to_string()));
        }

        let url = format!("{}/weather", self.base_url);
        debug!(location, "Fetching weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location),
                ("units", "imperial"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(WeatherError::UnknownLocation(location.to_string()));
        }
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "Weather provider returned error");
            return Err(WeatherError::Unavailable(format!("status {status}")));
        }

        let owm: OwmResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Unavailable(format!("Failed to parse response: {e}")))?;

        let conditions = owm
            .weather
            .first()
            .map(|c| {
                if c.description.is_empty() {
                    c.main.clone()
                } else {
                    c.description.clone()
                }
            })
            .unwrap_or_default();

        Ok(WeatherReport::new(
            location,
            WeatherReading {
                temperature: owm.main.temp,
                conditions,
                humidity: owm.main.humidity,
                wind_speed: owm.wind.speed,
            },
        ))
    }
}

/// Plausible weather derived from a hash of the location name.
///
/// The same location always gets the same weather, which makes it useful for
/// demos and offline runs.
pub struct MockWeatherProvider;

const MOCK_CONDITIONS: [&str; 8] = [
    "Clear skies",
    "Partly cloudy",
    "Overcast",
    "Light rain",
    "Heavy rain",
    "Thunderstorms",
    "Snow",
    "Foggy",
];

impl MockWeatherProvider {
    pub fn reading(location: &str) -> WeatherReading {
        let hash: u32 = location
            .trim()
            .to_lowercase()
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));

        let temp_c = ((hash % 40) as f64) - 5.0;
        let temp_f = temp_c * 9.0 / 5.0 + 32.0;

        WeatherReading {
            temperature: (temp_f * 10.0).round() / 10.0,
            conditions: MOCK_CONDITIONS[(hash as usize / 7) % MOCK_CONDITIONS.len()].to_string(),
            humidity: 30 + (hash % 60),
            wind_speed: ((hash % 30) as f64) + 5.0,
        }
    }
}

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn current(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        if location.trim().is_empty() {
            return Err(WeatherError::UnknownLocation(location.to_string()));
        }
        Ok(WeatherReport::new(location, Self::reading(location)))
    }
}
