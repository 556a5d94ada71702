//! Identifier assignment: `<prefix><n>` per category.
//!
//! The new suffix is one past the largest suffix already used with the
//! prefix. Gaps left by removed items are never reused. Ids that carry the
//! prefix but no parseable integer are ignored.

use fitify_core::item::Category;

/// Assign a fresh id for `category`, given every id currently in use
/// (store and laundry combined).
pub fn assign<'a, I>(existing: I, category: Category) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = category.prefix();
    let next = existing
        .into_iter()
        .filter_map(|id| suffix(id, prefix))
        .max()
        .map_or(1, |max| max + 1);

    format!("{prefix}{next}")
}

fn suffix(id: &str, prefix: &str) -> Option<u64> {
    let digits = id.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
