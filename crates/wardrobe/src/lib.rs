//! The Fitify wardrobe: which items can be worn, and what to wear.
//!
//! The building blocks are synchronous and pure:
//!
//! - [`ids`] assigns `<prefix><n>` identifiers per category
//! - [`ItemStore`] holds items available to wear
//! - [`LaundryFilter`] keeps worn items out of rotation for a few refreshes
//! - [`HistoryLog`] records accepted outfits
//! - [`OutfitSession`] proposes an outfit and swaps one slot at a time
//!
//! [`Wardrobe`] owns all of them plus the persistence repository, and
//! [`Stylist`] drives the full workflow against the oracle, weather and
//! calendar collaborators.

pub mod calendar;
pub mod history;
pub mod ids;
pub mod laundry;
pub mod session;
pub mod store;
pub mod stylist;
pub mod wardrobe;

#[cfg(test)]
mod test_helpers;

pub use calendar::CalendarRules;
pub use history::{HistoryLog, DEFAULT_RECENT};
pub use laundry::{filter_available, LaundryFilter, TickOutcome, DEFAULT_CYCLE_THRESHOLD};
pub use session::{OutfitSession, ProposedOutfit, SessionState, SwapOutcome};
pub use store::ItemStore;
pub use stylist::{Stylist, SuggestRequest, Suggestion, DEFAULT_ACTIVITY};
pub use wardrobe::Wardrobe;
