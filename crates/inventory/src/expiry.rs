//! Date-ordered index over items that carry an expiry date.

use std::collections::{BTreeSet, HashMap};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use stockroom_core::ItemName;

/// One `(expiry_date, name)` pair. Ordering is by date, then name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExpiryEntry {
    pub date: NaiveDate,
    pub name: ItemName,
}

/// Ascending index of expiry dates.
///
/// Holds names only; item data stays in the registry. A secondary map from
/// name to date makes `remove` independent of knowing the old date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpiryTracker {
    ordered: BTreeSet<ExpiryEntry>,
    by_name: HashMap<ItemName, NaiveDate>,
}

impl ExpiryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Expiry date tracked for `name`, if any.
    pub fn date_of(&self, name: &str) -> Option<NaiveDate> {
        self.by_name.get(name).copied()
    }

    /// Track `name` under `date`, replacing any previous entry for it.
    pub fn insert(&mut self, name: ItemName, date: NaiveDate) {
        self.remove(name.as_str());
        self.by_name.insert(name.clone(), date);
        self.ordered.insert(ExpiryEntry { date, name });
    }

    /// Stop tracking `name`. Unknown names are ignored.
    pub fn remove(&mut self, name: &str) -> Option<NaiveDate> {
        let (name, date) = self.by_name.remove_entry(name)?;
        self.ordered.remove(&ExpiryEntry { date, name });
        Some(date)
    }

    /// Remove and return every entry dated strictly before `today`, oldest first.
    pub fn purge_expired(&mut self, today: NaiveDate) -> Vec<ExpiryEntry> {
        let mut purged = Vec::new();
        while let Some(first) = self.ordered.first() {
            if first.date >= today {
                break;
            }
            if let Some(entry) = self.ordered.pop_first() {
                self.by_name.remove(&entry.name);
                purged.push(entry);
            }
        }
        purged
    }

    /// Entries dated in `today..=today + horizon_days`, ascending.
    ///
    /// Entries that already expired are not included.
    pub fn expiring_within(
        &self,
        today: NaiveDate,
        horizon_days: u32,
    ) -> impl Iterator<Item = &ExpiryEntry> + '_ {
        let until = today
            .checked_add_days(Days::new(u64::from(horizon_days)))
            .unwrap_or(NaiveDate::MAX);
        self.iter()
            .skip_while(move |entry| entry.date < today)
            .take_while(move |entry| entry.date <= until)
    }

    /// All tracked entries in ascending `(date, name)` order.
    pub fn iter(&self) -> impl Iterator<Item = &ExpiryEntry> + '_ {
        self.ordered.iter()
    }
}
