//! The inventory session: the single context object a front end holds.

use chrono::NaiveDate;

use stockroom_core::{Category, InventoryConfig, InventoryError, InventoryResult, ItemName};

use crate::history::{ActionHistory, ActionRecord, UndoneAction};
use crate::item::{Item, ItemUpdate, NewItem};
use crate::registry::ItemRegistry;
use crate::report::{ExpiryReportRow, Reports};

/// Owns the registry (and its expiry index) together with the undo history.
///
/// Every mutating call either succeeds completely, in which case exactly one
/// action record per affected item is pushed, or fails and leaves registry,
/// index and history untouched.
#[derive(Debug, Clone, Default)]
pub struct InventorySession {
    registry: ItemRegistry,
    history: ActionHistory,
    config: InventoryConfig,
}

impl InventorySession {
    pub fn new(config: InventoryConfig) -> Self {
        Self {
            registry: ItemRegistry::new(),
            history: ActionHistory::new(),
            config,
        }
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Register a new item.
    pub fn add(&mut self, draft: NewItem) -> InventoryResult<&Item> {
        let item = draft.validate()?;
        let name = item.name().clone();
        self.registry.add(item)?;
        self.history.record(ActionRecord::Add { name: name.clone() });

        let item = self.registry.get(name.as_str())?;
        tracing::info!(
            item = %name,
            category = %item.category(),
            quantity = item.quantity(),
            expiry_date = ?item.expiry_date(),
            "item added"
        );
        Ok(item)
    }

    /// Change fields of an existing item.
    pub fn update(&mut self, name: &str, update: &ItemUpdate) -> InventoryResult<&Item> {
        let before = self.registry.update(name, update)?;
        self.history.record(ActionRecord::Update { before });

        let item = self.registry.get(name)?;
        tracing::info!(
            item = %item.name(),
            quantity = item.quantity(),
            expiry_date = ?item.expiry_date(),
            "item updated"
        );
        Ok(item)
    }

    /// Receive (`delta > 0`) or withdraw (`delta < 0`) stock.
    pub fn adjust_stock(&mut self, name: &str, delta: i64) -> InventoryResult<&Item> {
        if delta == 0 {
            return Err(InventoryError::validation("delta cannot be zero"));
        }
        let before = self.registry.adjust(name, delta)?;
        self.history.record(ActionRecord::Update { before });

        let item = self.registry.get(name)?;
        tracing::info!(item = %item.name(), delta, quantity = item.quantity(), "stock adjusted");
        Ok(item)
    }

    /// Remove an item, returning the removed record.
    pub fn delete(&mut self, name: &str) -> InventoryResult<Item> {
        let removed = self.registry.delete(name)?;
        self.history.record(ActionRecord::Delete {
            item: removed.item.clone(),
            position: removed.position,
        });

        tracing::info!(item = %removed.item.name(), "item deleted");
        Ok(removed.item)
    }

    /// Delete every item that expired before `today`.
    ///
    /// Each purged item gets its own Delete record, so successive undos bring
    /// them back one at a time (latest expiry first).
    pub fn purge_expired(&mut self, today: NaiveDate) -> Vec<Item> {
        let removed = self.registry.purge_expired(today);
        let mut purged = Vec::with_capacity(removed.len());
        for entry in removed {
            tracing::info!(
                item = %entry.item.name(),
                expiry_date = ?entry.item.expiry_date(),
                %today,
                "expired item purged"
            );
            self.history.record(ActionRecord::Delete {
                item: entry.item.clone(),
                position: entry.position,
            });
            purged.push(entry.item);
        }
        purged
    }

    /// Revert the most recent mutation.
    ///
    /// Undo itself is not recorded. A record whose inverse no longer applies
    /// is dropped and its error returned: the registry is left as it was, but
    /// the history is one record shorter, so the next undo moves on to the
    /// record beneath it instead of failing on the same one again.
    pub fn undo(&mut self) -> InventoryResult<UndoneAction> {
        let record = self.history.pop().ok_or(InventoryError::EmptyHistory)?;
        let name = record.item_name().clone();
        match record.revert(&mut self.registry) {
            Ok(undone) => {
                tracing::info!(item = %name, "{}", undone);
                Ok(undone)
            }
            Err(err) => {
                tracing::warn!(item = %name, error = %err, "discarding action record that no longer applies");
                Err(err)
            }
        }
    }

    pub fn get(&self, name: &str) -> InventoryResult<&Item> {
        self.registry.get(name)
    }

    pub fn list_all(&self) -> impl Iterator<Item = &Item> + '_ {
        self.registry.list_all()
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> + '_ {
        self.registry.categories()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    /// Number of actions available to undo.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The action the next undo would revert.
    pub fn peek(&self) -> Option<&ActionRecord> {
        self.history.peek()
    }

    pub fn reports(&self) -> Reports<'_> {
        Reports::new(&self.registry)
    }

    pub fn low_stock_report(&self, threshold: u64) -> impl Iterator<Item = &Item> + '_ {
        tracing::debug!(threshold, "low-stock report");
        self.reports().low_stock(threshold)
    }

    /// Low-stock report at the configured threshold.
    pub fn low_stock(&self) -> impl Iterator<Item = &Item> + '_ {
        self.low_stock_report(self.config.low_stock_threshold)
    }

    pub fn expiry_report(&self, today: NaiveDate) -> impl Iterator<Item = ExpiryReportRow<'_>> + '_ {
        tracing::debug!(%today, "expiry report");
        self.reports().expiry(today)
    }

    /// Items due within the configured horizon of `today`.
    pub fn expiring_soon(&self, today: NaiveDate) -> impl Iterator<Item = (&ItemName, NaiveDate)> + '_ {
        self.reports()
            .expiring_within(today, self.config.expiry_horizon_days)
    }
}
