//! # Fitify Core
//!
//! Domain types, collaborator traits, and error definitions for the Fitify
//! wardrobe planner. This crate does **no I/O**: it defines the domain model
//! that every other crate implements against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is a trait here: the outfit and vision
//! oracles, the weather and calendar providers, and the persistence
//! repository. Implementations live in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Deterministic stub collaborators in tests
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod item;
pub mod outfit;
pub mod weather;
pub mod calendar;
pub mod oracle;
pub mod repository;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use item::{Category, NewItem, WardrobeItem};
pub use outfit::{Formality, OutfitContext, OutfitLogEntry, OutfitSlots, Slot};
pub use weather::{TemperatureCategory, WeatherAnalysis, WeatherProvider, WeatherReading, WeatherReport};
pub use calendar::{AthleticWindow, CalendarContext, CalendarEvent, CalendarProvider};
pub use oracle::{
    ClassifiedItem, ImageUpload, OutfitGrouping, OutfitOracle, OutfitProposal, OutfitRequest,
    SlotAlternative, SlotAlternatives, SlotRequest, VisionOracle,
};
pub use repository::{ImageStore, WardrobeRepository, WardrobeState};
