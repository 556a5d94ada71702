//! The wardrobe context: the single owner of store, laundry, history and
//! the working outfit.
//!
//! Every mutation that changes persisted state is staged on a draft copy,
//! saved through the injected repository, and only then swapped in. A failed
//! save leaves the in-memory wardrobe exactly as it was.

use std::sync::Arc;

use chrono::NaiveDate;
use fitify_core::error::{StorageError, WardrobeError};
use fitify_core::item::{Category, NewItem, WardrobeItem};
use fitify_core::oracle::OutfitOracle;
use fitify_core::outfit::{OutfitContext, OutfitLogEntry, Slot};
use fitify_core::repository::{WardrobeRepository, WardrobeState};
use fitify_core::Result;
use tracing::{debug, info};

use crate::history::HistoryLog;
use crate::ids;
use crate::laundry::{LaundryFilter, TickOutcome};
use crate::session::{OutfitSession, ProposedOutfit, SwapOutcome};
use crate::store::ItemStore;

/// Staged copy of the mutable state.
struct Draft {
    store: ItemStore,
    laundry: LaundryFilter,
    history: HistoryLog,
    session: OutfitSession,
}

impl Draft {
    fn snapshot(&self) -> WardrobeState {
        WardrobeState {
            items: self.store.list().to_vec(),
            laundry: self.laundry.entries().to_vec(),
            history: self.history.entries().to_vec(),
        }
    }
}

pub struct Wardrobe {
    store: ItemStore,
    laundry: LaundryFilter,
    history: HistoryLog,
    session: OutfitSession,
    repository: Arc<dyn WardrobeRepository>,
}

impl Wardrobe {
    /// Load the wardrobe from `repository`.
    pub async fn open(
        repository: Arc<dyn WardrobeRepository>,
        cycle_threshold: u32,
    ) -> std::result::Result<Self, StorageError> {
        let state = repository.load().await?;
        info!(
            backend = repository.name(),
            items = state.items.len(),
            laundry = state.laundry.len(),
            history = state.history.len(),
            "Wardrobe opened"
        );

        Ok(Self {
            store: ItemStore::new(state.items),
            laundry: LaundryFilter::new(cycle_threshold, state.laundry),
            history: HistoryLog::new(state.history),
            session: OutfitSession::new(),
            repository,
        })
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn laundry(&self) -> &LaundryFilter {
        &self.laundry
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn session(&self) -> &OutfitSession {
        &self.session
    }

    /// Every id in use, store and laundry combined.
    pub fn all_ids(&self) -> Vec<String> {
        self.store
            .ids()
            .chain(self.laundry.ids())
            .map(str::to_string)
            .collect()
    }

    /// The candidate set: stored items not in the wash.
    pub fn available(&self) -> Vec<WardrobeItem> {
        self.laundry.filter_available(self.store.list())
    }

    /// The id `item` would receive if added now.
    pub fn next_id(&self, item: &NewItem) -> std::result::Result<String, WardrobeError> {
        let category = Category::from_declared_type(&item.item_type)?;
        Ok(ids::assign(
            self.store.ids().chain(self.laundry.ids()),
            category,
        ))
    }

    /// Add a new item under a freshly assigned id.
    ///
    /// An undeclared or unknown type is rejected and nothing is stored.
    pub async fn add_item(&mut self, item: NewItem) -> Result<WardrobeItem> {
        let id = self.next_id(&item)?;
        let item = item.into_item(id);
        let mut draft = self.draft();
        draft.store.insert(item.clone());
        self.commit(draft).await?;

        info!(item_id = %item.id, item_type = %item.item_type, "Item added");
        Ok(item)
    }

    pub async fn remove_item(&mut self, id: &str) -> Result<WardrobeItem> {
        let mut draft = self.draft();
        let item = draft
            .store
            .remove(id)
            .ok_or_else(|| WardrobeError::ItemNotFound(id.to_string()))?;
        self.commit(draft).await?;

        info!(item_id = %id, "Item removed");
        Ok(item)
    }

    /// Run one laundry refresh, returning finished items to the store.
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        let mut draft = self.draft();
        let outcome = draft.laundry.tick();
        for item in &outcome.returned {
            draft.store.insert(item.clone());
        }
        self.commit(draft).await?;

        if !outcome.returned.is_empty() {
            info!(returned = ?outcome.returned_ids, "Items back from the laundry");
        }
        Ok(outcome)
    }

    /// Propose a full outfit from the available items.
    pub async fn generate(
        &mut self,
        oracle: &dyn OutfitOracle,
        context: OutfitContext,
    ) -> Result<ProposedOutfit> {
        let candidates = self.available();
        debug!(candidates = candidates.len(), "Generating outfit");
        Ok(self
            .session
            .generate_full(oracle, &self.store, &candidates, context)
            .await?)
    }

    /// Propose a throwaway outfit that does not enter the session.
    pub async fn preview(
        &self,
        oracle: &dyn OutfitOracle,
        context: OutfitContext,
    ) -> Result<ProposedOutfit> {
        let candidates = self.available();
        Ok(OutfitSession::new()
            .generate_full(oracle, &self.store, &candidates, context)
            .await?)
    }

    pub async fn swap(&mut self, oracle: &dyn OutfitOracle, slot: Slot) -> Result<SwapOutcome> {
        let candidates = self.available();
        self.session
            .swap_slot(oracle, slot, &self.store, &candidates)
            .await
    }

    /// Accept the working outfit, moving worn items to the wash and logging it.
    ///
    /// If the save fails the outfit stays proposed and can be accepted again.
    pub async fn accept(&mut self, date: NaiveDate, notes: &str) -> Result<OutfitLogEntry> {
        let mut draft = self.draft();
        let entry = draft.session.accept(
            date,
            notes,
            &mut draft.store,
            &mut draft.laundry,
            &mut draft.history,
        )?;
        self.commit(draft).await?;
        Ok(entry)
    }

    /// Drop the working outfit.
    pub fn discard(&mut self) {
        self.session.clear();
    }

    pub fn current(&self) -> Option<&ProposedOutfit> {
        self.session.current()
    }

    pub fn recent(&self, n: Option<usize>) -> Vec<&OutfitLogEntry> {
        self.history.recent(n)
    }

    fn draft(&self) -> Draft {
        Draft {
            store: self.store.clone(),
            laundry: self.laundry.clone(),
            history: self.history.clone(),
            session: self.session.clone(),
        }
    }

    /// Save `draft` and make it the live state.
    async fn commit(&mut self, draft: Draft) -> std::result::Result<(), StorageError> {
        self.repository.save(&draft.snapshot()).await?;
        let Draft {
            store,
            laundry,
            history,
            session,
        } = draft;
        self.store = store;
        self.laundry = laundry;
        self.history = history;
        self.session = session;
        Ok(())
    }
}
