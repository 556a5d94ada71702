//! Weather provider trait and the reading → clothing analysis.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Raw conditions as reported by the provider (imperial units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Degrees Fahrenheit
    pub temperature: f64,
    pub conditions: String,
    /// Percent
    pub humidity: u32,
    /// Miles per hour
    pub wind_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureCategory {
    Cold,
    Cool,
    Mild,
    Warm,
    Hot,
}

impl TemperatureCategory {
    pub fn from_fahrenheit(temp: f64) -> Self {
        if temp < 45.0 {
            Self::Cold
        } else if temp < 60.0 {
            Self::Cool
        } else if temp <= 75.0 {
            Self::Mild
        } else if temp <= 85.0 {
            Self::Warm
        } else {
            Self::Hot
        }
    }
}

impl std::fmt::Display for TemperatureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Cold => "cold",
            Self::Cool => "cool",
            Self::Mild => "mild",
            Self::Warm => "warm",
            Self::Hot => "hot",
        })
    }
}

/// Free-text classification handed to the outfit oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAnalysis {
    pub temperature_category: TemperatureCategory,
    pub weather_conditions: Vec<String>,
    pub clothing_recommendations: Vec<String>,
}

impl WeatherAnalysis {
    /// Classify a reading deterministically.
    pub fn from_reading(reading: &WeatherReading) -> Self {
        let temperature_category = TemperatureCategory::from_fahrenheit(reading.temperature);
        let conditions = reading.conditions.to_lowercase();

        let mut weather_conditions = Vec::new();
        if conditions.contains("rain") || conditions.contains("drizzle") || conditions.contains("thunder") {
            weather_conditions.push("rainy".to_string());
        }
        if conditions.contains("snow") || conditions.contains("sleet") {
            weather_conditions.push("snowy".to_string());
        }
        if conditions.contains("clear") || conditions.contains("sun") {
            weather_conditions.push("sunny".to_string());
        }
        if reading.wind_speed >= 15.0 {
            weather_conditions.push("windy".to_string());
        }
        if weather_conditions.is_empty() {
            weather_conditions.push(conditions.clone());
        }

        let mut clothing_recommendations = vec![match temperature_category {
            TemperatureCategory::Cold => "heavy layers and a warm outer layer",
            TemperatureCategory::Cool => "long sleeves or a light jacket",
            TemperatureCategory::Mild => "light layers",
            TemperatureCategory::Warm => "breathable short sleeves",
            TemperatureCategory::Hot => "lightweight, loose clothing",
        }
        .to_string()];
        if weather_conditions.iter().any(|c| c == "rainy" || c == "snowy") {
            clothing_recommendations.push("water-resistant shoes".to_string());
        }
        if weather_conditions.iter().any(|c| c == "windy") {
            clothing_recommendations.push("wind-resistant outer layer".to_string());
        }

        Self {
            temperature_category,
            weather_conditions,
            clothing_recommendations,
        }
    }
}

/// A reading plus its analysis for a named location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub reading: WeatherReading,
    pub analysis: WeatherAnalysis,
}

impl WeatherReport {
    pub fn new(location: impl Into<String>, reading: WeatherReading) -> Self {
        let analysis = WeatherAnalysis::from_reading(&reading);
        Self {
            location: location.into(),
            reading,
            analysis,
        }
    }
}

/// The weather provider trait.
///
/// Implementations: OpenWeatherMap, deterministic mock.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Current conditions at `location`. Failure means the outfit flow must stop.
    async fn current(&self, location: &str) -> Result<WeatherReport, WeatherError>;
}
