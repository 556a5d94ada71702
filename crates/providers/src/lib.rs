//! Collaborator implementations for Fitify.
//!
//! The outfit and vision oracles speak the OpenAI-compatible chat completions
//! protocol (Mistral by default). Weather comes from OpenWeatherMap or a
//! deterministic offline mock, and calendar events from Google Calendar.
//! [`build_from_config`] wires the configured set together.

pub mod calendar;
pub mod chat;
pub mod parse;
pub mod prompts;
pub mod setup;
pub mod weather;

pub use calendar::GoogleCalendarProvider;
pub use chat::ChatOracle;
pub use setup::{Collaborators, build_from_config};
pub use weather::{MockWeatherProvider, OpenWeatherMapProvider};
