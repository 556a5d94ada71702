//! Error types for the Fitify domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Propagation policy: malformed oracle payloads never appear here. They are
//! recovered with a fallback inside the provider crate. Only weather and
//! oracle *unavailability* stop a suggestion flow.

use thiserror::Error;

use crate::outfit::Slot;

/// The top-level error type for all Fitify operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Wardrobe domain errors ---
    #[error("Wardrobe error: {0}")]
    Wardrobe(#[from] WardrobeError),

    // --- Oracle errors ---
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    // --- Weather errors ---
    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    // --- Calendar errors ---
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WardrobeError {
    #[error("Unknown clothing category: '{declared}'")]
    UnknownCategory { declared: String },

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("No alternative found for {slot} (current: {})", current.as_deref().unwrap_or("empty"))]
    NoAlternativeFound { slot: Slot, current: Option<String> },

    #[error("No outfit is currently proposed")]
    NoActiveOutfit,

    #[error("Invalid outfit log entry: {0}")]
    InvalidLogEntry(String),

    #[error("Invalid slot: '{0}' (expected top, bottom or shoes)")]
    InvalidSlot(String),

    #[error("Invalid formality: '{0}' (expected casual or formal)")]
    InvalidFormality(String),
}

#[derive(Debug, Clone, Error)]
pub enum OracleError {
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    #[error("Oracle request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Oracle request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Oracle authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited by oracle, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Oracle not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Clone, Error)]
pub enum WeatherError {
    #[error("Weather unavailable: unknown location '{0}'")]
    UnknownLocation(String),

    #[error("Weather unavailable: {0}")]
    Unavailable(String),

    #[error("Weather provider not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Clone, Error)]
pub enum CalendarError {
    #[error("Calendar not configured: {0}")]
    NotConfigured(String),

    #[error("Calendar request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O failure on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Corrupt data in {path}: {reason}")]
    Serialization { path: String, reason: String },
}
