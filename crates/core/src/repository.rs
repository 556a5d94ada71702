//! Persistence traits: the wardrobe repository and the photo store.
//!
//! Persistence is read-modify-write with a single writer: the wardrobe loads
//! the whole state once and saves the whole state after every mutation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::item::WardrobeItem;
use crate::oracle::ImageUpload;
use crate::outfit::OutfitLogEntry;

/// Everything that survives a restart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WardrobeState {
    /// Items available to wear
    #[serde(default)]
    pub items: Vec<WardrobeItem>,

    /// Items in the wash; `wear_count` is the laundry counter
    #[serde(default)]
    pub laundry: Vec<WardrobeItem>,

    /// Finalized outfits, oldest first
    #[serde(default)]
    pub history: Vec<OutfitLogEntry>,
}

/// The repository trait.
///
/// Implementations: JSON files, in-memory (for testing).
#[async_trait]
pub trait WardrobeRepository: Send + Sync {
    /// The backend name (e.g., "json", "in_memory").
    fn name(&self) -> &str;

    /// Load the full state. A repository with nothing stored yields the empty state.
    async fn load(&self) -> Result<WardrobeState, StorageError>;

    /// Replace the stored state.
    async fn save(&self, state: &WardrobeState) -> Result<(), StorageError>;
}

/// Where garment photos are kept.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the photo for `item_id`, returning the stored path.
    async fn save(&self, item_id: &str, image: &ImageUpload) -> Result<String, StorageError>;

    /// Delete a photo previously returned by [`ImageStore::save`].
    async fn remove(&self, _path: &str) -> Result<(), StorageError> {
        Ok(())
    }
}
