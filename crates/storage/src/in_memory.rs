//! In-memory repository: useful for testing and ephemeral sessions.

use async_trait::async_trait;
use fitify_core::error::StorageError;
use fitify_core::repository::{WardrobeRepository, WardrobeState};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A repository that keeps the wardrobe state in memory.
/// Useful for testing and sessions where persistence isn't needed.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<RwLock<WardrobeState>>,
    saves: Arc<RwLock<usize>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-populated state.
    pub fn with_state(state: WardrobeState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            saves: Arc::new(RwLock::new(0)),
        }
    }

    /// The last saved state.
    pub async fn snapshot(&self) -> WardrobeState {
        self.state.read().await.clone()
    }

    /// How many times `save` has been called.
    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }
}

#[async_trait]
impl WardrobeRepository for InMemoryRepository {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn load(&self) -> Result<WardrobeState, StorageError> {
        Ok(self.state.read().await.clone())
    }

    async fn save(&self, state: &WardrobeState) -> Result<(), StorageError> {
        *self.state.write().await = state.clone();
        *self.saves.write().await += 1;
        Ok(())
    }
}
