//! Append-only log of finalized outfits.

use fitify_core::error::WardrobeError;
use fitify_core::outfit::OutfitLogEntry;

/// Entries returned by [`HistoryLog::recent`] when no limit is given.
pub const DEFAULT_RECENT: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<OutfitLogEntry>,
}

impl HistoryLog {
    pub fn new(entries: Vec<OutfitLogEntry>) -> Self {
        Self { entries }
    }

    /// Check an entry without appending it.
    ///
    /// An entry must fill at least one slot. Its date is a `NaiveDate` and so
    /// never empty. The id check only guards against hand-edited history
    /// files, since `OutfitLogEntry::new` always assigns one.
    pub fn validate(entry: &OutfitLogEntry) -> Result<(), WardrobeError> {
        if entry.id.trim().is_empty() {
            return Err(WardrobeError::InvalidLogEntry("entry has no id".into()));
        }
        if entry.slots.is_empty() {
            return Err(WardrobeError::InvalidLogEntry(
                "outfit has no items".into(),
            ));
        }
        Ok(())
    }

    pub fn append(&mut self, entry: OutfitLogEntry) -> Result<(), WardrobeError> {
        Self::validate(&entry)?;
        self.entries.push(entry);
        Ok(())
    }

    /// The last `n` entries, newest first. `None` means [`DEFAULT_RECENT`].
    pub fn recent(&self, n: Option<usize>) -> Vec<&OutfitLogEntry> {
        self.entries
            .iter()
            .rev()
            .take(n.unwrap_or(DEFAULT_RECENT))
            .collect()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[OutfitLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fitify_core::outfit::{Formality, OutfitSlots};

    fn entry(day: u32, top: &str) -> OutfitLogEntry {
        OutfitLogEntry::new(
            NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            OutfitSlots {
                top: Some(top.into()),
                ..OutfitSlots::default()
            },
            None,
            "school",
            Formality::Casual,
            "",
        )
    }

    #[test]
    fn recent_is_newest_first() {
        let mut log = HistoryLog::default();
        for day in 1..=3 {
            log.append(entry(day, &format!("top{day}"))).unwrap();
        }

        let recent: Vec<&str> = log
            .recent(Some(2))
            .iter()
            .map(|e| e.slots.top.as_deref().unwrap())
            .collect();
        assert_eq!(recent, vec!["top3", "top2"]);
    }

    #[test]
    fn recent_defaults_to_ten() {
        let mut log = HistoryLog::default();
        for day in 1..=12 {
            log.append(entry(day, "top1")).unwrap();
        }
        assert_eq!(log.recent(None).len(), DEFAULT_RECENT);
        assert_eq!(log.recent(Some(50)).len(), 12);
        assert!(log.recent(Some(0)).is_empty());
    }

    #[test]
    fn empty_outfit_is_rejected() {
        let mut log = HistoryLog::default();
        let mut bad = entry(1, "top1");
        bad.slots = OutfitSlots::default();

        assert!(matches!(
            log.append(bad),
            Err(WardrobeError::InvalidLogEntry(_))
        ));
        assert!(log.is_empty());
    }

    #[test]
    fn one_filled_slot_is_enough() {
        let mut log = HistoryLog::default();
        let shoes_only = OutfitLogEntry::new(
            NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            OutfitSlots {
                shoes: Some("shoe1".into()),
                ..OutfitSlots::default()
            },
            None,
            "gym",
            Formality::Casual,
            "",
        );

        log.append(shoes_only).unwrap();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn hand_edited_entry_without_id_is_rejected() {
        let mut bad = entry(1, "top1");
        bad.id = String::new();
        assert!(HistoryLog::validate(&bad).is_err());
    }
}
