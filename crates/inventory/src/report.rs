//! Read-only queries over the registry and its expiry index.

use chrono::NaiveDate;
use serde::Serialize;

use stockroom_core::{Category, ItemName};

use crate::item::Item;
use crate::registry::ItemRegistry;

/// One line of the expiry report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryReportRow<'a> {
    pub item: &'a Item,
    pub expiry_date: NaiveDate,
    pub expired: bool,
    /// Days from `today` to the expiry date; negative once expired.
    pub days_until_expiry: i64,
}

/// One line of the stock listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryReportRow<'a> {
    pub item: &'a Item,
    pub total_value: u64,
}

/// Totals over a selection of items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    pub item_count: usize,
    pub total_quantity: u64,
    pub total_value: u64,
}

/// Report generator.
///
/// Borrows the registry immutably, so nothing it returns can outlive or
/// change the data it was derived from.
#[derive(Debug, Clone, Copy)]
pub struct Reports<'a> {
    registry: &'a ItemRegistry,
}

impl<'a> Reports<'a> {
    pub fn new(registry: &'a ItemRegistry) -> Self {
        Self { registry }
    }

    /// Items with `quantity < threshold`, ascending by quantity, then name.
    pub fn low_stock(&self, threshold: u64) -> impl Iterator<Item = &'a Item> + use<'a> {
        let mut low: Vec<&'a Item> = self
            .registry
            .list_all()
            .filter(|item| item.quantity() < threshold)
            .collect();
        low.sort_by(|a, b| {
            a.quantity()
                .cmp(&b.quantity())
                .then_with(|| a.name().cmp(b.name()))
        });
        low.into_iter()
    }

    /// Every item with an expiry date, ascending by date, then name.
    pub fn expiry(&self, today: NaiveDate) -> impl Iterator<Item = ExpiryReportRow<'a>> + use<'a> {
        let registry = self.registry;
        registry.expiry().iter().filter_map(move |entry| {
            let item = registry.get(entry.name.as_str()).ok()?;
            Some(ExpiryReportRow {
                item,
                expiry_date: entry.date,
                expired: entry.date < today,
                days_until_expiry: (entry.date - today).num_days(),
            })
        })
    }

    /// Items due within `horizon_days` of `today` (not yet expired).
    pub fn expiring_within(
        &self,
        today: NaiveDate,
        horizon_days: u32,
    ) -> impl Iterator<Item = (&'a ItemName, NaiveDate)> + use<'a> {
        self.registry
            .expiry()
            .expiring_within(today, horizon_days)
            .map(|entry| (&entry.name, entry.date))
    }

    /// Items sorted by name, optionally restricted to one category.
    pub fn inventory(
        &self,
        category: Option<&Category>,
    ) -> impl Iterator<Item = InventoryReportRow<'a>> + use<'a> {
        let mut rows: Vec<InventoryReportRow<'a>> = self
            .registry
            .list_all()
            .filter(|item| category.is_none_or(|c| item.category() == c))
            .map(|item| InventoryReportRow {
                item,
                total_value: item.total_value(),
            })
            .collect();
        rows.sort_by(|a, b| a.item.name().cmp(b.item.name()));
        rows.into_iter()
    }

    /// Count, quantity and value totals, optionally for one category.
    pub fn summary(&self, category: Option<&Category>) -> InventorySummary {
        self.inventory(category)
            .fold(InventorySummary::default(), |mut acc, row| {
                acc.item_count += 1;
                acc.total_quantity = acc.total_quantity.saturating_add(row.item.quantity());
                acc.total_value = acc.total_value.saturating_add(row.total_value);
                acc
            })
    }

    /// Items whose name contains `fragment`, ignoring case, sorted by name.
    pub fn search(&self, fragment: &str) -> impl Iterator<Item = &'a Item> + use<'a> {
        let needle = fragment.trim().to_lowercase();
        let mut hits: Vec<&'a Item> = self
            .registry
            .list_all()
            .filter(|item| item.name().as_str().to_lowercase().contains(&needle))
            .collect();
        hits.sort_by(|a, b| a.name().cmp(b.name()));
        hits.into_iter()
    }
}
