//! JSON file repository: the wardrobe as three human-editable files.
//!
//! Layout under the data directory:
//! - `wardrobe.json`: `{"items": [...]}`, items available to wear
//! - `worn.json`: `{"laundry": [...]}`, items in the wash with their counters
//! - `history.json`: `{"outfits": [...]}`, finalized outfits, oldest first
//!
//! A missing file loads as empty. A file that exists but does not parse is an
//! error: silently dropping a wardrobe would lose data on the next save.
//!
//! A save is a small two-phase commit:
//! 1. all three documents are written to `<name>.tmp` siblings
//! 2. a `commit.marker` file is created
//! 3. the temporaries are renamed into place in the order `worn.json`,
//!    `wardrobe.json`, `history.json`
//! 4. the marker is removed
//!
//! A write failure in step 1 leaves the live files untouched. If a rename
//! fails, the marker stays behind and the next `load` finishes the renames
//! before reading, so an item moving between `wardrobe.json` and `worn.json`
//! is never lost in either direction. Temporaries found without a marker
//! belong to an abandoned save and are deleted. A save that failed during
//! the renames is therefore completed on the next load.

use async_trait::async_trait;
use fitify_core::error::StorageError;
use fitify_core::item::WardrobeItem;
use fitify_core::outfit::OutfitLogEntry;
use fitify_core::repository::{WardrobeRepository, WardrobeState};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const WARDROBE_FILE: &str = "wardrobe.json";
const WORN_FILE: &str = "worn.json";
const HISTORY_FILE: &str = "history.json";
const COMMIT_MARKER: &str = "commit.marker";

/// Rename order for a commit. The laundry goes before the wardrobe.
const COMMIT_ORDER: [&str; 3] = [WORN_FILE, WARDROBE_FILE, HISTORY_FILE];

#[derive(Default, Serialize, Deserialize)]
struct WardrobeFile {
    #[serde(default)]
    items: Vec<WardrobeItem>,
}

#[derive(Default, Serialize, Deserialize)]
struct WornFile {
    #[serde(default)]
    laundry: Vec<WardrobeItem>,
}

#[derive(Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    outfits: Vec<OutfitLogEntry>,
}

/// A file-backed wardrobe repository.
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    /// Create a repository rooted at `dir`. Nothing is touched until first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_json<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, StorageError> {
        let path = self.dir.join(name);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => {
                return Err(StorageError::Io {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&content).map_err(|e| StorageError::Serialization {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn tmp_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.tmp"))
    }

    /// Write `value` to the temporary sibling of `name`.
    async fn stage_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StorageError> {
        let tmp = self.tmp_path(name);
        let json = serde_json::to_string_pretty(value).map_err(|e| StorageError::Serialization {
            path: tmp.display().to_string(),
            reason: e.to_string(),
        })?;

        tokio::fs::write(&tmp, json).await.map_err(|e| io_error(&tmp, e))
    }

    /// Move every staged temporary into place, in commit order.
    async fn promote_staged(&self) -> Result<(), StorageError> {
        for name in COMMIT_ORDER {
            let tmp = self.tmp_path(name);
            if !tokio::fs::try_exists(&tmp).await.map_err(|e| io_error(&tmp, e))? {
                continue;
            }
            let path = self.dir.join(name);
            tokio::fs::rename(&tmp, &path)
                .await
                .map_err(|e| io_error(&path, e))?;
        }
        Ok(())
    }

    /// Finish or discard a save that did not complete.
    async fn recover(&self) -> Result<(), StorageError> {
        let marker = self.dir.join(COMMIT_MARKER);
        if tokio::fs::try_exists(&marker).await.map_err(|e| io_error(&marker, e))? {
            warn!(dir = %self.dir.display(), "Completing interrupted save");
            self.promote_staged().await?;
            return remove_if_present(&marker).await;
        }

        for name in COMMIT_ORDER {
            remove_if_present(&self.tmp_path(name)).await?;
        }
        Ok(())
    }
}

fn io_error(path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

async fn remove_if_present(path: &Path) -> Result<(), StorageError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_error(path, e)),
    }
}

#[async_trait]
impl WardrobeRepository for JsonFileRepository {
    fn name(&self) -> &str {
        "json"
    }

    async fn load(&self) -> Result<WardrobeState, StorageError> {
        self.recover().await?;

        let wardrobe: WardrobeFile = self.read_json(WARDROBE_FILE).await?;
        let worn: WornFile = self.read_json(WORN_FILE).await?;
        let history: HistoryFile = self.read_json(HISTORY_FILE).await?;

        debug!(
            dir = %self.dir.display(),
            items = wardrobe.items.len(),
            laundry = worn.laundry.len(),
            history = history.outfits.len(),
            "Wardrobe loaded"
        );

        Ok(WardrobeState {
            items: wardrobe.items,
            laundry: worn.laundry,
            history: history.outfits,
        })
    }

    async fn save(&self, state: &WardrobeState) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::Io {
                path: self.dir.display().to_string(),
                reason: format!("Failed to create data directory: {e}"),
            })?;

        self.stage_json(
            WORN_FILE,
            &WornFile {
                laundry: state.laundry.clone(),
            },
        )
        .await?;
        self.stage_json(
            WARDROBE_FILE,
            &WardrobeFile {
                items: state.items.clone(),
            },
        )
        .await?;
        self.stage_json(
            HISTORY_FILE,
            &HistoryFile {
                outfits: state.history.clone(),
            },
        )
        .await?;

        let marker = self.dir.join(COMMIT_MARKER);
        tokio::fs::write(&marker, b"")
            .await
            .map_err(|e| io_error(&marker, e))?;
        self.promote_staged().await?;
        remove_if_present(&marker).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fitify_core::outfit::{Formality, OutfitSlots};

    fn item(id: &str, item_type: &str, wear_count: u32) -> WardrobeItem {
        WardrobeItem {
            id: id.into(),
            item_type: item_type.into(),
            form: "cotton".into(),
            weather_tags: ["mild".to_string()].into_iter().collect(),
            color: "blue".into(),
            notes: String::new(),
            wear_count,
            image_path: String::new(),
        }
    }

    #[tokio::test]
    async fn save_and_reload_persists() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());

        let state = WardrobeState {
            items: vec![item("top1", "shirt", 0), item("shoe1", "shoes", 0)],
            laundry: vec![item("bottom1", "jeans", 1)],
            history: vec![OutfitLogEntry::new(
                NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                OutfitSlots {
                    top: Some("top1".into()),
                    bottom: Some("bottom1".into()),
                    shoes: Some("shoe1".into()),
                },
                None,
                "school",
                Formality::Casual,
                "",
            )],
        };
        repo.save(&state).await.unwrap();

        let reloaded = JsonFileRepository::new(dir.path()).load().await.unwrap();
        assert_eq!(reloaded, state);
    }

    #[tokio::test]
    async fn uses_wardrobe_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());
        repo.save(&WardrobeState {
            items: vec![],
            laundry: vec![item("top2", "sweater", 0)],
            history: vec![],
        })
        .await
        .unwrap();

        let worn = std::fs::read_to_string(dir.path().join("worn.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&worn).unwrap();
        assert_eq!(value["laundry"][0]["id"], "top2");
        assert_eq!(value["laundry"][0]["count"], 0);
        assert!(dir.path().join("wardrobe.json").exists());
        assert!(dir.path().join("history.json").exists());
    }

    #[tokio::test]
    async fn handles_missing_directory_gracefully() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("not-created-yet"));
        let state = repo.load().await.unwrap();
        assert_eq!(state, WardrobeState::default());
    }

    #[tokio::test]
    async fn reads_hand_written_wardrobe_without_optional_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("wardrobe.json"),
            r#"{"items":[{"id":"shoe1","type":"shoes","form":"leather","weather":["mild"],"color":"brown","notes":""}]}"#,
        )
        .unwrap();

        let state = JsonFileRepository::new(dir.path()).load().await.unwrap();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].wear_count, 0);
        assert!(state.laundry.is_empty());
    }

    #[tokio::test]
    async fn corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("worn.json"), "this is not json").unwrap();

        let result = JsonFileRepository::new(dir.path()).load().await;
        assert!(matches!(result, Err(StorageError::Serialization { .. })));
    }

    fn worn_outfit_state() -> (WardrobeState, WardrobeState) {
        let before = WardrobeState {
            items: vec![item("top1", "shirt", 0), item("bottom1", "jeans", 0)],
            ..WardrobeState::default()
        };
        let after = WardrobeState {
            laundry: vec![item("top1", "shirt", 0), item("bottom1", "jeans", 0)],
            ..WardrobeState::default()
        };
        (before, after)
    }

    #[tokio::test]
    async fn interrupted_save_moves_laundry_first_and_completes_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());
        let (before, after) = worn_outfit_state();
        repo.save(&before).await.unwrap();

        // A directory in place of wardrobe.json makes its rename fail.
        std::fs::remove_file(dir.path().join("wardrobe.json")).unwrap();
        std::fs::create_dir(dir.path().join("wardrobe.json")).unwrap();
        let result = repo.save(&after).await;
        assert!(matches!(result, Err(StorageError::Io { .. })));

        let worn = std::fs::read_to_string(dir.path().join("worn.json")).unwrap();
        assert!(worn.contains("bottom1"));
        assert!(dir.path().join("commit.marker").exists());

        std::fs::remove_dir(dir.path().join("wardrobe.json")).unwrap();
        let reloaded = JsonFileRepository::new(dir.path()).load().await.unwrap();
        assert_eq!(reloaded, after);
        assert!(!dir.path().join("commit.marker").exists());
        assert!(!dir.path().join("wardrobe.json.tmp").exists());
    }

    #[tokio::test]
    async fn staged_files_without_marker_are_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());
        let (before, after) = worn_outfit_state();
        repo.save(&before).await.unwrap();

        std::fs::write(
            dir.path().join("worn.json.tmp"),
            serde_json::to_string(&serde_json::json!({ "laundry": after.laundry })).unwrap(),
        )
        .unwrap();

        let reloaded = repo.load().await.unwrap();
        assert_eq!(reloaded, before);
        assert!(!dir.path().join("worn.json.tmp").exists());
    }
}
