//! The outfit session: propose, refine one slot at a time, accept.
//!
//! ```text
//!            generate_full
//!   Idle ───────────────────▶ Proposed ──┐
//!    ▲                           │  ▲    │ swap_slot
//!    │          accept           │  └────┘
//!    └───────────────────────────┘
//! ```
//!
//! A swap only ever touches the requested slot. The occupants of the other
//! two slots are passed to the oracle as fixed context.

use chrono::NaiveDate;
use fitify_core::error::{OracleError, WardrobeError};
use fitify_core::oracle::{OutfitOracle, OutfitRequest, SlotAlternatives, SlotRequest};
use fitify_core::outfit::{OutfitContext, OutfitLogEntry, OutfitSlots, Slot};
use fitify_core::WardrobeItem;
use serde::Serialize;
use tracing::{debug, info};

use crate::history::HistoryLog;
use crate::laundry::LaundryFilter;
use crate::store::ItemStore;

/// The working outfit and what the oracle said about it.
#[derive(Debug, Clone, Serialize)]
pub struct ProposedOutfit {
    pub slots: OutfitSlots,
    pub name: String,
    pub style_notes: String,
    pub recommendations: Vec<String>,

    /// The context the outfit was generated for; reused for swaps and the log
    pub context: OutfitContext,
}

impl ProposedOutfit {
    /// Whether every slot holds an item. Callers should check this before
    /// offering acceptance.
    pub fn is_complete(&self) -> bool {
        self.slots.is_complete()
    }

    /// Slots the oracle could not fill.
    pub fn missing(&self) -> Vec<Slot> {
        self.slots.missing()
    }
}

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Proposed(ProposedOutfit),
}

/// Result of a successful single-slot swap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapOutcome {
    pub slot: Slot,
    pub previous: Option<String>,
    pub item_id: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default)]
pub struct OutfitSession {
    state: SessionState,
}

impl OutfitSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current(&self) -> Option<&ProposedOutfit> {
        match &self.state {
            SessionState::Proposed(p) => Some(p),
            SessionState::Idle => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SessionState::Idle)
    }

    /// Drop the working outfit without recording anything.
    pub fn clear(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Ask the oracle for a whole outfit drawn from `candidates`.
    ///
    /// On an oracle failure the session keeps its previous state.
    pub async fn generate_full(
        &mut self,
        oracle: &dyn OutfitOracle,
        store: &ItemStore,
        candidates: &[WardrobeItem],
        context: OutfitContext,
    ) -> Result<ProposedOutfit, OracleError> {
        let request = OutfitRequest {
            context,
            candidates: candidates.to_vec(),
        };
        let proposal = oracle.suggest_outfits(&request).await?;

        let grouping = proposal.outfits.into_iter().next().unwrap_or_default();
        let slots = slots_from_ids(&grouping.items, store);
        info!(
            oracle = oracle.name(),
            top = ?slots.top,
            bottom = ?slots.bottom,
            shoes = ?slots.shoes,
            "Outfit proposed"
        );

        let outfit = ProposedOutfit {
            slots,
            name: grouping.name,
            style_notes: grouping.style_notes,
            recommendations: proposal.recommendations,
            context: request.context,
        };
        self.state = SessionState::Proposed(outfit.clone());
        Ok(outfit)
    }

    /// Replace the item in `slot`, keeping the other two.
    ///
    /// Fails with [`WardrobeError::NoAlternativeFound`] when the oracle offers
    /// nothing usable; the slot is then left exactly as it was.
    pub async fn swap_slot(
        &mut self,
        oracle: &dyn OutfitOracle,
        slot: Slot,
        store: &ItemStore,
        candidates: &[WardrobeItem],
    ) -> fitify_core::Result<SwapOutcome> {
        let SessionState::Proposed(proposal) = &mut self.state else {
            return Err(WardrobeError::NoActiveOutfit.into());
        };

        let current = proposal.slots.get(slot).map(str::to_string);
        let request = SlotRequest {
            slot,
            context: proposal.context.clone(),
            candidates: candidates
                .iter()
                .filter(|i| i.category() == Some(slot.category()))
                .cloned()
                .collect(),
            fixed: slot
                .others()
                .iter()
                .filter_map(|other| proposal.slots.get(*other))
                .filter_map(|id| store.get(id))
                .cloned()
                .collect(),
            current: current.as_deref().and_then(|id| store.get(id)).cloned(),
        };

        let response = oracle.suggest_alternatives(&request).await?;
        let Some((item_id, notes)) =
            pick_alternative(slot, current.as_deref(), &response, candidates)
        else {
            debug!(slot = %slot, offered = response.alternatives.len(), "No usable alternative");
            return Err(WardrobeError::NoAlternativeFound { slot, current }.into());
        };

        proposal.slots.set(slot, Some(item_id.clone()));
        if !response.recommendations.is_empty() {
            proposal.recommendations = response.recommendations;
        }
        info!(slot = %slot, from = ?current, to = %item_id, "Slot swapped");

        Ok(SwapOutcome {
            slot,
            previous: current,
            item_id,
            notes,
        })
    }

    /// Finalize the working outfit: worn items go to the wash, the outfit is
    /// logged, and the session returns to Idle.
    ///
    /// The log entry is validated before anything moves, so a rejected entry
    /// leaves store, laundry and history untouched.
    pub fn accept(
        &mut self,
        date: NaiveDate,
        notes: &str,
        store: &mut ItemStore,
        laundry: &mut LaundryFilter,
        history: &mut HistoryLog,
    ) -> Result<OutfitLogEntry, WardrobeError> {
        let SessionState::Proposed(proposal) = &self.state else {
            return Err(WardrobeError::NoActiveOutfit);
        };

        let entry = OutfitLogEntry::new(
            date,
            proposal.slots.clone(),
            Some(proposal.context.weather.reading.clone()),
            proposal.context.activity.clone(),
            proposal.context.formality,
            notes,
        );
        HistoryLog::validate(&entry)?;

        laundry.commit_worn(&entry.slots, store);
        history.append(entry.clone())?;
        self.state = SessionState::Idle;

        info!(entry_id = %entry.id, date = %entry.date, "Outfit accepted");
        Ok(entry)
    }
}

/// Map oracle item ids onto slots. Ids are classified by the declared type of
/// the stored item; the first id seen for a slot wins and unknown ids are
/// skipped.
pub fn slots_from_ids(ids: &[String], store: &ItemStore) -> OutfitSlots {
    let mut slots = OutfitSlots::default();

    for id in ids {
        let Some(category) = store.get(id).and_then(WardrobeItem::category) else {
            debug!(item_id = %id, "Oracle returned an unknown item id");
            continue;
        };
        let slot = Slot::for_category(category);
        if slots.get(slot).is_some() {
            debug!(item_id = %id, slot = %slot, "Slot already filled, discarding");
            continue;
        }
        slots.set(slot, Some(id.clone()));
    }

    slots
}

/// The first alternative that differs from `current` and is a candidate of
/// the slot's category.
fn pick_alternative(
    slot: Slot,
    current: Option<&str>,
    response: &SlotAlternatives,
    candidates: &[WardrobeItem],
) -> Option<(String, String)> {
    response
        .alternatives
        .iter()
        .filter(|alt| Some(alt.item_id.as_str()) != current)
        .find(|alt| {
            candidates
                .iter()
                .any(|c| c.id == alt.item_id && c.category() == Some(slot.category()))
        })
        .map(|alt| (alt.item_id.clone(), alt.notes.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{alternatives, day, item, mild_report, outfit, ScriptedOutfitOracle};
    use fitify_core::error::Error;
    use fitify_core::outfit::Formality;

    fn context() -> OutfitContext {
        OutfitContext {
            weather: mild_report(),
            formality: Formality::Casual,
            activity: "school".into(),
        }
    }

    fn wardrobe() -> ItemStore {
        ItemStore::new(vec![
            item("top1", "t-shirt"),
            item("top2", "sweater"),
            item("bottom1", "jeans"),
            item("shoe1", "shoes"),
        ])
    }

    fn slots(top: &str, bottom: &str, shoes: &str) -> OutfitSlots {
        OutfitSlots {
            top: Some(top.into()),
            bottom: Some(bottom.into()),
            shoes: Some(shoes.into()),
        }
    }

    async fn proposed(store: &ItemStore, ids: &[&str]) -> OutfitSession {
        let oracle = ScriptedOutfitOracle::outfits(vec![outfit(ids)]);
        let mut session = OutfitSession::new();
        session
            .generate_full(&oracle, store, store.list(), context())
            .await
            .unwrap();
        session
    }

    // ── generate_full ──

    #[tokio::test]
    async fn generate_fills_slots_from_oracle_ids() {
        let store = ItemStore::new(vec![
            item("top1", "t-shirt"),
            item("bottom1", "jeans"),
            item("shoe1", "shoes"),
        ]);
        let oracle = ScriptedOutfitOracle::outfits(vec![outfit(&["top1", "bottom1", "shoe1"])]);
        let mut session = OutfitSession::new();

        let proposal = session
            .generate_full(&oracle, &store, store.list(), context())
            .await
            .unwrap();

        assert_eq!(proposal.slots, slots("top1", "bottom1", "shoe1"));
        assert!(proposal.is_complete());
        assert_eq!(proposal.name, "Weekday");
        assert_eq!(oracle.outfit_requests()[0].candidates.len(), 3);
    }

    #[tokio::test]
    async fn order_of_oracle_ids_does_not_matter() {
        let store = wardrobe();
        let session = proposed(&store, &["shoe1", "bottom1", "top2"]).await;
        assert_eq!(session.current().unwrap().slots, slots("top2", "bottom1", "shoe1"));
    }

    #[tokio::test]
    async fn first_id_per_slot_wins() {
        let store = wardrobe();
        let session = proposed(&store, &["top2", "top1", "bottom1"]).await;
        let current = session.current().unwrap();
        assert_eq!(current.slots.top.as_deref(), Some("top2"));
        assert!(current.slots.shoes.is_none());
        assert!(!current.is_complete());
    }

    #[tokio::test]
    async fn unknown_ids_leave_an_empty_proposal() {
        let store = wardrobe();
        let session = proposed(&store, &["item_id1", "item_id2", "item_id3"]).await;
        let current = session.current().unwrap();
        assert!(current.slots.is_empty());
        assert!(!session.is_idle());
    }

    #[tokio::test]
    async fn oracle_failure_keeps_previous_state() {
        let store = wardrobe();
        let oracle = ScriptedOutfitOracle::new(
            vec![Err(OracleError::Unavailable("connection refused".into()))],
            vec![],
        );
        let mut session = OutfitSession::new();

        let result = session
            .generate_full(&oracle, &store, store.list(), context())
            .await;

        assert!(matches!(result, Err(OracleError::Unavailable(_))));
        assert!(session.is_idle());
    }

    // ── swap_slot ──

    #[tokio::test]
    async fn swap_replaces_only_the_requested_slot() {
        let store = wardrobe();
        let mut session = proposed(&store, &["top1", "bottom1", "shoe1"]).await;
        let oracle = ScriptedOutfitOracle::new(vec![], vec![Ok(alternatives(&["top2"]))]);

        let outcome = session
            .swap_slot(&oracle, Slot::Top, &store, store.list())
            .await
            .unwrap();

        assert_eq!(outcome.previous.as_deref(), Some("top1"));
        assert_eq!(outcome.item_id, "top2");
        assert_eq!(session.current().unwrap().slots, slots("top2", "bottom1", "shoe1"));
    }

    #[tokio::test]
    async fn swap_sends_fixed_slots_and_category_candidates() {
        let store = wardrobe();
        let mut session = proposed(&store, &["top1", "bottom1", "shoe1"]).await;
        let oracle = ScriptedOutfitOracle::new(vec![], vec![Ok(alternatives(&["top2"]))]);

        session
            .swap_slot(&oracle, Slot::Top, &store, store.list())
            .await
            .unwrap();

        let request = &oracle.slot_requests()[0];
        let fixed: Vec<&str> = request.fixed.iter().map(|i| i.id.as_str()).collect();
        let candidates: Vec<&str> = request.candidates.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(fixed, vec!["bottom1", "shoe1"]);
        assert_eq!(candidates, vec!["top1", "top2"]);
        assert_eq!(request.current.as_ref().unwrap().id, "top1");
        assert_eq!(request.context.activity, "school");
    }

    #[tokio::test]
    async fn swap_with_only_current_occupant_fails() {
        let store = ItemStore::new(vec![item("top1", "shirt"), item("top2", "shirt")]);
        let mut session = proposed(&store, &["top1"]).await;
        let oracle = ScriptedOutfitOracle::new(vec![], vec![Ok(alternatives(&["top1"]))]);

        let err = session
            .swap_slot(&oracle, Slot::Top, &store, store.list())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Wardrobe(WardrobeError::NoAlternativeFound { slot: Slot::Top, ref current })
                if current.as_deref() == Some("top1")
        ));
        assert_eq!(session.current().unwrap().slots.top.as_deref(), Some("top1"));
    }

    #[tokio::test]
    async fn swap_with_empty_list_fails() {
        let store = wardrobe();
        let mut session = proposed(&store, &["top1", "bottom1", "shoe1"]).await;
        let oracle = ScriptedOutfitOracle::new(vec![], vec![Ok(alternatives(&[]))]);

        let result = session
            .swap_slot(&oracle, Slot::Bottom, &store, store.list())
            .await;

        assert!(matches!(
            result,
            Err(Error::Wardrobe(WardrobeError::NoAlternativeFound { .. }))
        ));
        assert_eq!(session.current().unwrap().slots, slots("top1", "bottom1", "shoe1"));
    }

    #[tokio::test]
    async fn swap_skips_ids_outside_candidates_and_wrong_category() {
        let store = wardrobe();
        let mut session = proposed(&store, &["top1", "bottom1", "shoe1"]).await;
        let oracle = ScriptedOutfitOracle::new(
            vec![],
            vec![Ok(alternatives(&["top1", "item_id", "bottom1", "top2"]))],
        );

        let outcome = session
            .swap_slot(&oracle, Slot::Top, &store, store.list())
            .await
            .unwrap();
        assert_eq!(outcome.item_id, "top2");
    }

    #[tokio::test]
    async fn swap_ignores_items_not_in_candidates() {
        let store = wardrobe();
        let mut session = proposed(&store, &["top1", "bottom1", "shoe1"]).await;
        let oracle = ScriptedOutfitOracle::new(vec![], vec![Ok(alternatives(&["top2"]))]);
        let candidates: Vec<WardrobeItem> = store
            .list()
            .iter()
            .filter(|i| i.id != "top2")
            .cloned()
            .collect();

        let result = session
            .swap_slot(&oracle, Slot::Top, &store, &candidates)
            .await;
        assert!(result.is_err());
        assert_eq!(session.current().unwrap().slots.top.as_deref(), Some("top1"));
    }

    #[tokio::test]
    async fn swap_fills_an_empty_slot() {
        let store = wardrobe();
        let mut session = proposed(&store, &["top1", "bottom1"]).await;
        let oracle = ScriptedOutfitOracle::new(vec![], vec![Ok(alternatives(&["shoe1"]))]);

        let outcome = session
            .swap_slot(&oracle, Slot::Shoes, &store, store.list())
            .await
            .unwrap();
        assert!(outcome.previous.is_none());
        assert!(session.current().unwrap().is_complete());
    }

    #[tokio::test]
    async fn swap_oracle_failure_leaves_slot() {
        let store = wardrobe();
        let mut session = proposed(&store, &["top1", "bottom1", "shoe1"]).await;
        let oracle = ScriptedOutfitOracle::new(
            vec![],
            vec![Err(OracleError::Timeout { timeout_secs: 60 })],
        );

        let result = session
            .swap_slot(&oracle, Slot::Top, &store, store.list())
            .await;
        assert!(matches!(result, Err(Error::Oracle(OracleError::Timeout { .. }))));
        assert_eq!(session.current().unwrap().slots, slots("top1", "bottom1", "shoe1"));
    }

    #[tokio::test]
    async fn swap_while_idle_is_rejected() {
        let store = wardrobe();
        let mut session = OutfitSession::new();
        let oracle = ScriptedOutfitOracle::new(vec![], vec![]);

        let result = session
            .swap_slot(&oracle, Slot::Top, &store, store.list())
            .await;
        assert!(matches!(
            result,
            Err(Error::Wardrobe(WardrobeError::NoActiveOutfit))
        ));
        assert!(oracle.slot_requests().is_empty());
    }

    // ── accept ──

    #[tokio::test]
    async fn accept_commits_laundry_and_logs() {
        let mut store = wardrobe();
        let mut session = proposed(&store, &["top1", "bottom1", "shoe1"]).await;
        let mut laundry = LaundryFilter::default();
        let mut history = HistoryLog::default();

        let entry = session
            .accept(day(), "felt great", &mut store, &mut laundry, &mut history)
            .unwrap();

        assert!(session.is_idle());
        assert_eq!(entry.slots, slots("top1", "bottom1", "shoe1"));
        assert_eq!(entry.notes, "felt great");
        assert_eq!(entry.activity, "school");
        assert_eq!(entry.weather.as_ref().unwrap().temperature, 68.0);
        assert!(laundry.contains("top1"));
        assert!(laundry.contains("bottom1"));
        assert!(store.contains("shoe1"));
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn accepting_an_empty_outfit_changes_nothing() {
        let mut store = wardrobe();
        let mut session = proposed(&store, &["nope"]).await;
        let mut laundry = LaundryFilter::default();
        let mut history = HistoryLog::default();

        let result = session.accept(day(), "", &mut store, &mut laundry, &mut history);

        assert!(matches!(result, Err(WardrobeError::InvalidLogEntry(_))));
        assert!(!session.is_idle());
        assert!(laundry.is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn accept_while_idle_is_rejected() {
        let mut store = wardrobe();
        let mut session = OutfitSession::new();
        let result = session.accept(
            day(),
            "",
            &mut store,
            &mut LaundryFilter::default(),
            &mut HistoryLog::default(),
        );
        assert_eq!(result.unwrap_err(), WardrobeError::NoActiveOutfit);
    }
}
