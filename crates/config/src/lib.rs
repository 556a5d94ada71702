//! Configuration loading, validation, and management for Fitify.
//!
//! Loads configuration from `~/.fitify/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.fitify/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the oracle endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Outfit and vision oracle settings
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Calendar provider settings
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Laundry cycle settings
    #[serde(default)]
    pub laundry: LaundryConfig,

    /// Where wardrobe data and photos live
    #[serde(default)]
    pub storage: StorageConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("oracle", &self.oracle)
            .field("weather", &self.weather)
            .field("calendar", &self.calendar)
            .field("laundry", &self.laundry)
            .field("storage", &self.storage)
            .field("gateway", &self.gateway)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default = "default_oracle_provider")]
    pub provider: String,

    #[serde(default = "default_oracle_url")]
    pub api_url: String,

    #[serde(default = "default_text_model")]
    pub text_model: String,

    #[serde(default = "default_vision_model")]
    pub vision_model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_oracle_provider() -> String {
    "mistral".into()
}
fn default_oracle_url() -> String {
    "https://api.mistral.ai/v1".into()
}
fn default_text_model() -> String {
    "mistral-large-latest".into()
}
fn default_vision_model() -> String {
    "pixtral-12b-2409".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: default_oracle_provider(),
            api_url: default_oracle_url(),
            text_model: default_text_model(),
            vision_model: default_vision_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// "openweathermap" or "mock"
    #[serde(default = "default_weather_provider")]
    pub provider: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_location")]
    pub default_location: String,
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("provider", &self.provider)
            .field("api_key", &redact(&self.api_key))
            .field("default_location", &self.default_location)
            .finish()
    }
}

fn default_weather_provider() -> String {
    "openweathermap".into()
}
fn default_location() -> String {
    "Chicago, US".into()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            provider: default_weather_provider(),
            api_key: None,
            default_location: default_location(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub enabled: bool,

    /// An already-issued OAuth access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,

    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: u32,

    #[serde(default = "default_formal_keywords")]
    pub formal_keywords: Vec<String>,

    #[serde(default = "default_athletic_keywords")]
    pub athletic_keywords: Vec<String>,
}

impl std::fmt::Debug for CalendarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarConfig")
            .field("enabled", &self.enabled)
            .field("access_token", &redact(&self.access_token))
            .field("calendar_id", &self.calendar_id)
            .field("lookahead_days", &self.lookahead_days)
            .field("formal_keywords", &self.formal_keywords)
            .field("athletic_keywords", &self.athletic_keywords)
            .finish()
    }
}

fn default_calendar_id() -> String {
    "primary".into()
}
fn default_lookahead_days() -> u32 {
    1
}
fn default_formal_keywords() -> Vec<String> {
    ["meeting", "interview", "competition", "presentation"]
        .map(String::from)
        .to_vec()
}
fn default_athletic_keywords() -> Vec<String> {
    ["practice", "training", "workout", "gym"]
        .map(String::from)
        .to_vec()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            access_token: None,
            calendar_id: default_calendar_id(),
            lookahead_days: default_lookahead_days(),
            formal_keywords: default_formal_keywords(),
            athletic_keywords: default_athletic_keywords(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaundryConfig {
    /// Refresh ticks an item spends in the wash before it is wearable again
    #[serde(default = "default_cycle_threshold")]
    pub cycle_threshold: u32,
}

fn default_cycle_threshold() -> u32 {
    2
}

impl Default for LaundryConfig {
    fn default() -> Self {
        Self {
            cycle_threshold: default_cycle_threshold(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Defaults to `~/.fitify/data`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Defaults to `~/.fitify/wardrobe`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_allowed_origin() -> String {
    "http://localhost:8081".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allowed_origin: default_allowed_origin(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.fitify/config.toml).
    ///
    /// Also checks environment variables for secrets:
    /// - `FITIFY_API_KEY` (highest priority), `MISTRAL_API_KEY`, `OPENAI_API_KEY`
    /// - `FITIFY_WEATHER_API_KEY`, `OPENWEATHER_API_KEY`
    /// - `GOOGLE_CALENDAR_TOKEN`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if self.api_key.is_none() {
            self.api_key = std::env::var("FITIFY_API_KEY")
                .ok()
                .or_else(|| std::env::var("MISTRAL_API_KEY").ok())
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("FITIFY_MODEL") {
            self.oracle.text_model = model;
        }

        if self.weather.api_key.is_none() {
            self.weather.api_key = std::env::var("FITIFY_WEATHER_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENWEATHER_API_KEY").ok());
        }

        if self.calendar.access_token.is_none() {
            self.calendar.access_token = std::env::var("GOOGLE_CALENDAR_TOKEN").ok();
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".fitify")
    }

    /// Directory holding wardrobe.json, worn.json and history.json.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("data"))
    }

    /// Directory holding garment photos.
    pub fn image_dir(&self) -> PathBuf {
        self.storage
            .image_dir
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("wardrobe"))
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.oracle.temperature < 0.0 || self.oracle.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "oracle.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.oracle.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "oracle.timeout_secs must be > 0".into(),
            ));
        }

        if self.laundry.cycle_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "laundry.cycle_threshold must be at least 1".into(),
            ));
        }

        if !matches!(self.weather.provider.as_str(), "openweathermap" | "mock") {
            return Err(ConfigError::ValidationError(format!(
                "unknown weather.provider '{}' (expected openweathermap or mock)",
                self.weather.provider
            )));
        }

        Ok(())
    }

    /// Check if an oracle API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            oracle: OracleConfig::default(),
            weather: WeatherConfig::default(),
            calendar: CalendarConfig::default(),
            laundry: LaundryConfig::default(),
            storage: StorageConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
