//! The laundry filter.
//!
//! Worn tops and bottoms sit in the wash for a fixed number of refresh ticks
//! before they return to the item store. Shoes never enter the laundry.
//!
//! Each tick runs in two phases:
//!
//! 1. **Release** every entry whose counter, counting the cycle this tick
//!    represents, reaches the threshold (`wear_count + 1 >= threshold`).
//! 2. **Increment** the counter of every entry still in the wash.
//!
//! With the default threshold of 2 an item committed at 0 comes back on the
//! second tick after it was worn.

use std::collections::BTreeSet;

use fitify_core::item::WardrobeItem;
use fitify_core::outfit::{OutfitSlots, Slot};
use tracing::{debug, warn};

use crate::store::ItemStore;

/// Default number of ticks an item spends in the wash.
pub const DEFAULT_CYCLE_THRESHOLD: u32 = 2;

/// What a tick gave back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Ids that became available on this tick
    pub returned_ids: BTreeSet<String>,

    /// The returned items, counters reset to 0
    pub returned: Vec<WardrobeItem>,
}

/// Items in the wash, keyed by id, each carrying its laundry counter in
/// `wear_count`.
#[derive(Debug, Clone)]
pub struct LaundryFilter {
    threshold: u32,
    entries: Vec<WardrobeItem>,
}

impl Default for LaundryFilter {
    fn default() -> Self {
        Self::new(DEFAULT_CYCLE_THRESHOLD, Vec::new())
    }
}

impl LaundryFilter {
    /// A threshold of 0 behaves like 1: every entry leaves on the next tick.
    pub fn new(threshold: u32, entries: Vec<WardrobeItem>) -> Self {
        Self {
            threshold: threshold.max(1),
            entries,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn entries(&self) -> &[WardrobeItem] {
        &self.entries
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance the laundry cycle by one refresh.
    pub fn tick(&mut self) -> TickOutcome {
        let threshold = self.threshold;
        let (done, still_washing): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.wear_count.saturating_add(1) >= threshold);

        self.entries = still_washing;
        for entry in &mut self.entries {
            entry.wear_count += 1;
        }

        let mut outcome = TickOutcome::default();
        for mut item in done {
            item.wear_count = 0;
            outcome.returned_ids.insert(item.id.clone());
            outcome.returned.push(item);
        }

        debug!(
            returned = outcome.returned.len(),
            remaining = self.entries.len(),
            "Laundry tick"
        );
        outcome
    }

    /// Items from `all` that are not in the wash.
    pub fn filter_available(&self, all: &[WardrobeItem]) -> Vec<WardrobeItem> {
        filter_available(all, &self.entries)
    }

    /// Move the worn top and bottom from the store into the wash with a
    /// zeroed counter. The shoes slot is left alone. Ids missing from the
    /// store are skipped.
    ///
    /// Returns the ids that entered the wash.
    pub fn commit_worn(&mut self, slots: &OutfitSlots, store: &mut ItemStore) -> Vec<String> {
        let mut moved = Vec::new();

        for (slot, id) in slots.filled() {
            if slot == Slot::Shoes {
                continue;
            }
            let Some(mut item) = store.remove(id) else {
                warn!(item_id = %id, slot = %slot, "Worn item not in store, skipping");
                continue;
            };
            item.wear_count = 0;
            moved.push(item.id.clone());
            self.entries.push(item);
        }

        debug!(items = ?moved, "Committed worn items to laundry");
        moved
    }
}

/// `all` minus anything whose id is a key of `laundry`.
pub fn filter_available(all: &[WardrobeItem], laundry: &[WardrobeItem]) -> Vec<WardrobeItem> {
    let washing: BTreeSet<&str> = laundry.iter().map(|e| e.id.as_str()).collect();
    all.iter()
        .filter(|i| !washing.contains(i.id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, item_type: &str, wear_count: u32) -> WardrobeItem {
        WardrobeItem {
            id: id.into(),
            item_type: item_type.into(),
            form: String::new(),
            weather_tags: Default::default(),
            color: String::new(),
            notes: String::new(),
            wear_count,
            image_path: String::new(),
        }
    }

    fn outfit(top: &str, bottom: &str, shoes: &str) -> OutfitSlots {
        OutfitSlots {
            top: Some(top.into()),
            bottom: Some(bottom.into()),
            shoes: Some(shoes.into()),
        }
    }

    fn store() -> ItemStore {
        ItemStore::new(vec![
            item("top1", "shirt", 0),
            item("bottom1", "jeans", 0),
            item("shoe1", "shoes", 0),
            item("top2", "sweater", 0),
        ])
    }

    // ── commit_worn ──

    #[test]
    fn commit_moves_top_and_bottom_only() {
        let mut store = store();
        let mut laundry = LaundryFilter::default();

        let moved = laundry.commit_worn(&outfit("top1", "bottom1", "shoe1"), &mut store);

        assert_eq!(moved, vec!["top1", "bottom1"]);
        assert!(laundry.contains("top1"));
        assert!(laundry.contains("bottom1"));
        assert!(!laundry.contains("shoe1"));
        assert!(store.contains("shoe1"));
        assert!(!store.contains("top1"));
        assert!(laundry.entries().iter().all(|e| e.wear_count == 0));
    }

    #[test]
    fn commit_skips_missing_items() {
        let mut store = store();
        let mut laundry = LaundryFilter::default();

        let moved = laundry.commit_worn(&outfit("top9", "bottom1", "shoe1"), &mut store);

        assert_eq!(moved, vec!["bottom1"]);
        assert_eq!(laundry.len(), 1);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn commit_with_empty_slots() {
        let mut store = store();
        let mut laundry = LaundryFilter::default();
        let slots = OutfitSlots {
            top: Some("top2".into()),
            ..OutfitSlots::default()
        };

        laundry.commit_worn(&slots, &mut store);
        assert_eq!(laundry.ids().collect::<Vec<_>>(), vec!["top2"]);
    }

    #[test]
    fn commit_resets_a_stale_counter() {
        let mut store = ItemStore::new(vec![item("top1", "shirt", 5)]);
        let mut laundry = LaundryFilter::default();
        let slots = OutfitSlots {
            top: Some("top1".into()),
            ..OutfitSlots::default()
        };

        laundry.commit_worn(&slots, &mut store);
        assert_eq!(laundry.entries()[0].wear_count, 0);
    }

    // ── tick ──

    #[test]
    fn item_at_threshold_minus_one_returns_on_that_tick() {
        let mut laundry = LaundryFilter::new(2, vec![item("top1", "shirt", 1)]);
        let outcome = laundry.tick();

        assert!(outcome.returned_ids.contains("top1"));
        assert_eq!(outcome.returned[0].wear_count, 0);
        assert!(laundry.is_empty());
    }

    #[test]
    fn remaining_items_are_incremented_after_release() {
        let mut laundry = LaundryFilter::new(
            3,
            vec![item("top1", "shirt", 0), item("bottom1", "jeans", 2)],
        );
        let outcome = laundry.tick();

        assert_eq!(
            outcome.returned_ids.iter().collect::<Vec<_>>(),
            vec!["bottom1"]
        );
        assert_eq!(laundry.entries()[0].id, "top1");
        assert_eq!(laundry.entries()[0].wear_count, 1);
    }

    #[test]
    fn overdue_items_are_released() {
        let mut laundry = LaundryFilter::new(2, vec![item("top1", "shirt", 7)]);
        assert!(laundry.tick().returned_ids.contains("top1"));
    }

    #[test]
    fn empty_laundry_tick_is_a_no_op() {
        let mut laundry = LaundryFilter::default();
        assert_eq!(laundry.tick(), TickOutcome::default());
    }

    #[test]
    fn commit_then_two_ticks_returns_everything() {
        let mut store = store();
        let mut laundry = LaundryFilter::new(2, vec![]);

        laundry.commit_worn(&outfit("top1", "bottom1", "shoe1"), &mut store);
        assert!(store.contains("shoe1"));

        let first = laundry.tick();
        assert!(first.returned.is_empty());
        assert!(store.contains("shoe1"));
        assert_eq!(laundry.len(), 2);

        let second = laundry.tick();
        let expected: BTreeSet<String> = ["top1", "bottom1"].iter().map(|s| s.to_string()).collect();
        assert_eq!(second.returned_ids, expected);
        assert!(laundry.is_empty());

        for item in second.returned {
            store.insert(item);
        }
        assert_eq!(store.len(), 4);
        assert!(store.contains("shoe1"));
    }

    #[test]
    fn threshold_one_returns_on_first_tick() {
        let mut laundry = LaundryFilter::new(1, vec![item("top1", "shirt", 0)]);
        assert_eq!(laundry.tick().returned.len(), 1);
    }

    // ── filter_available ──

    #[test]
    fn filter_excludes_laundry_ids() {
        let all = vec![
            item("top1", "shirt", 0),
            item("top2", "sweater", 0),
            item("shoe1", "shoes", 0),
        ];
        let laundry = LaundryFilter::new(2, vec![item("top1", "shirt", 1)]);

        let available = laundry.filter_available(&all);
        let ids: Vec<&str> = available.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["top2", "shoe1"]);
    }

    #[test]
    fn filter_never_returns_laundry_items_across_cycles() {
        let mut store = store();
        let mut laundry = LaundryFilter::new(3, vec![]);
        laundry.commit_worn(&outfit("top1", "bottom1", "shoe1"), &mut store);

        for _ in 0..4 {
            let mut all = store.list().to_vec();
            all.extend(laundry.entries().iter().cloned());
            let available = laundry.filter_available(&all);
            assert!(available.iter().all(|i| !laundry.contains(&i.id)));

            for item in laundry.tick().returned {
                store.insert(item);
            }
        }
    }
}
