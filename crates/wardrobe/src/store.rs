//! The item store: wardrobe items currently available to wear.

use fitify_core::item::{Category, WardrobeItem};

/// Items owned by the wardrobe while they are out of the wash.
///
/// Keeps insertion order so listings are stable across saves.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<WardrobeItem>,
}

impl ItemStore {
    pub fn new(items: Vec<WardrobeItem>) -> Self {
        Self { items }
    }

    /// Insert an item that already carries its final id.
    pub fn insert(&mut self, item: WardrobeItem) {
        self.items.push(item);
    }

    pub fn remove(&mut self, id: &str) -> Option<WardrobeItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&WardrobeItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn list(&self) -> &[WardrobeItem] {
        &self.items
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.id.as_str())
    }

    /// Items whose declared type maps to `category`.
    pub fn by_category(&self, category: Category) -> Vec<&WardrobeItem> {
        self.items
            .iter()
            .filter(|i| i.category() == Some(category))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
