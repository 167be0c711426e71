//! Authoritative store of all current items, keyed by name.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use stockroom_core::{Category, InventoryError, InventoryResult, ItemName};

use crate::expiry::ExpiryTracker;
use crate::item::{Item, ItemUpdate};

/// An item taken out of the registry, with the slot it occupied in
/// enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedItem {
    pub position: usize,
    pub item: Item,
}

/// Item registry.
///
/// Owns every `Item` and keeps two derived indexes in step with it: the
/// [`ExpiryTracker`] and a reference-counted set of categories in use. Every
/// mutating method validates first and mutates afterwards, so a failed call
/// leaves all three untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: HashMap<ItemName, Item>,
    order: Vec<ItemName>,
    categories: BTreeMap<Category, usize>,
    expiry: ExpiryTracker,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(key(name))
    }

    /// Insert a new item at the end of the enumeration order.
    pub fn add(&mut self, item: Item) -> InventoryResult<()> {
        let position = self.order.len();
        self.insert_at(position, item)
    }

    /// Insert a new item at `position` in enumeration order (clamped to the end).
    pub(crate) fn insert_at(&mut self, position: usize, item: Item) -> InventoryResult<()> {
        if self.items.contains_key(item.name().as_str()) {
            return Err(InventoryError::duplicate(item.name().as_str()));
        }

        let name = item.name().clone();
        self.index(&item);
        self.order.insert(position.min(self.order.len()), name.clone());
        self.items.insert(name, item);
        Ok(())
    }

    /// Apply `update` to the named item and return its prior snapshot.
    pub fn update(&mut self, name: &str, update: &ItemUpdate) -> InventoryResult<Item> {
        let next = self.get(name)?.updated(update)?;
        self.replace(next)
    }

    /// Add `delta` units to the named item and return its prior snapshot.
    pub fn adjust(&mut self, name: &str, delta: i64) -> InventoryResult<Item> {
        let next = self.get(name)?.adjusted(delta)?;
        self.replace(next)
    }

    /// Overwrite the stored record that has the same name as `item`,
    /// returning the previous record.
    pub(crate) fn replace(&mut self, item: Item) -> InventoryResult<Item> {
        let slot = self
            .items
            .get_mut(item.name().as_str())
            .ok_or_else(|| InventoryError::not_found(item.name().as_str()))?;
        let previous = core::mem::replace(slot, item.clone());

        if previous.category() != item.category() {
            release_category(&mut self.categories, previous.category());
            *self.categories.entry(item.category().clone()).or_default() += 1;
        }
        if previous.expiry_date() != item.expiry_date() {
            self.expiry.remove(item.name().as_str());
            if let Some(date) = item.expiry_date() {
                self.expiry.insert(item.name().clone(), date);
            }
        }
        Ok(previous)
    }

    /// Remove the named item.
    pub fn delete(&mut self, name: &str) -> InventoryResult<RemovedItem> {
        let name = key(name);
        let item = self
            .items
            .remove(name)
            .ok_or_else(|| InventoryError::not_found(name))?;

        let position = self
            .order
            .iter()
            .position(|n| n.as_str() == name)
            .unwrap_or(self.order.len());
        if position < self.order.len() {
            self.order.remove(position);
        }
        self.unindex(&item);

        Ok(RemovedItem { position, item })
    }

    /// Remove every item whose expiry date is strictly before `today`.
    ///
    /// Items come back oldest expiry first. Each `position` is the slot the
    /// item held at the moment it was removed, so re-inserting them in
    /// reverse order restores the original enumeration order.
    pub fn purge_expired(&mut self, today: NaiveDate) -> Vec<RemovedItem> {
        let expired = self.expiry.purge_expired(today);
        let mut removed = Vec::with_capacity(expired.len());
        for entry in expired {
            match self.delete(entry.name.as_str()) {
                Ok(item) => removed.push(item),
                Err(err) => {
                    tracing::warn!(item = %entry.name, error = %err, "expiry index out of step with registry");
                }
            }
        }
        removed
    }

    /// Read-only view of the named item.
    pub fn get(&self, name: &str) -> InventoryResult<&Item> {
        let name = key(name);
        self.items
            .get(name)
            .ok_or_else(|| InventoryError::not_found(name))
    }

    /// All items in insertion order.
    ///
    /// The iterator borrows the registry, so the order is stable for as long
    /// as it lives; calling again yields the same sequence.
    pub fn list_all(&self) -> impl Iterator<Item = &Item> + '_ {
        self.order.iter().filter_map(|name| self.items.get(name))
    }

    /// Categories with at least one item, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &Category> + '_ {
        self.categories.keys()
    }

    /// Date-ordered expiry index over the registered items.
    pub fn expiry(&self) -> &ExpiryTracker {
        &self.expiry
    }

    fn index(&mut self, item: &Item) {
        *self.categories.entry(item.category().clone()).or_default() += 1;
        if let Some(date) = item.expiry_date() {
            self.expiry.insert(item.name().clone(), date);
        }
    }

    fn unindex(&mut self, item: &Item) {
        release_category(&mut self.categories, item.category());
        self.expiry.remove(item.name().as_str());
    }
}

/// Lookup key for a user-entered name; matches the trimming `ItemName` applies.
fn key(name: &str) -> &str {
    name.trim()
}

fn release_category(categories: &mut BTreeMap<Category, usize>, category: &Category) {
    if let Some(count) = categories.get_mut(category) {
        *count -= 1;
        if *count == 0 {
            categories.remove(category);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::NewItem;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(name: &str, category: &str, quantity: i64, expiry: Option<NaiveDate>) -> Item {
        NewItem::new(name, category, quantity, expiry).validate().unwrap()
    }

    fn names(registry: &ItemRegistry) -> Vec<&str> {
        registry.list_all().map(|i| i.name().as_str()).collect()
    }

    #[test]
    fn add_then_get_returns_inserted_fields() {
        let mut registry = ItemRegistry::new();
        let milk = item("Milk", "Dairy", 10, Some(date(2023, 1, 5)));
        registry.add(milk.clone()).unwrap();

        assert_eq!(registry.get("Milk").unwrap(), &milk);
        assert_eq!(registry.expiry().date_of("Milk"), Some(date(2023, 1, 5)));
    }

    #[test]
    fn duplicate_add_is_rejected_without_side_effects() {
        let mut registry = ItemRegistry::new();
        registry.add(item("Milk", "Dairy", 10, None)).unwrap();

        let err = registry
            .add(item("Milk", "Bakery", 1, Some(date(2023, 1, 1))))
            .unwrap_err();
        assert_eq!(err, InventoryError::DuplicateKey("Milk".to_string()));
        assert_eq!(registry.get("Milk").unwrap().quantity(), 10);
        assert!(registry.expiry().is_empty());
        assert_eq!(registry.categories().count(), 1);
    }

    #[test]
    fn update_moves_expiry_entry() {
        let mut registry = ItemRegistry::new();
        registry.add(item("Milk", "Dairy", 10, Some(date(2023, 1, 5)))).unwrap();

        let before = registry
            .update("Milk", &ItemUpdate::expiry_date(Some(date(2023, 2, 1))))
            .unwrap();
        assert_eq!(before.expiry_date(), Some(date(2023, 1, 5)));
        assert_eq!(registry.expiry().date_of("Milk"), Some(date(2023, 2, 1)));

        registry.update("Milk", &ItemUpdate::expiry_date(None)).unwrap();
        assert!(registry.expiry().is_empty());
    }

    #[test]
    fn negative_update_is_rejected() {
        let mut registry = ItemRegistry::new();
        registry.add(item("Milk", "Dairy", 10, None)).unwrap();

        let err = registry.update("Milk", &ItemUpdate::quantity(-2)).unwrap_err();
        assert_eq!(err, InventoryError::InvalidQuantity(-2));
        assert_eq!(registry.get("Milk").unwrap().quantity(), 10);
    }

    #[test]
    fn missing_names_are_not_found() {
        let mut registry = ItemRegistry::new();
        assert_eq!(
            registry.update("Ghost", &ItemUpdate::quantity(1)).unwrap_err(),
            InventoryError::NotFound("Ghost".to_string())
        );
        assert!(matches!(registry.delete("Ghost"), Err(InventoryError::NotFound(_))));
        assert!(matches!(registry.get("Ghost"), Err(InventoryError::NotFound(_))));
    }

    #[test]
    fn delete_reports_position_and_unindexes() {
        let mut registry = ItemRegistry::new();
        registry.add(item("Milk", "Dairy", 10, Some(date(2023, 1, 5)))).unwrap();
        registry.add(item("Rice", "Grains", 100, None)).unwrap();
        registry.add(item("Eggs", "Dairy", 12, None)).unwrap();

        let removed = registry.delete("Milk").unwrap();
        assert_eq!(removed.position, 0);
        assert_eq!(names(&registry), vec!["Rice", "Eggs"]);
        assert!(registry.expiry().is_empty());
        // Eggs still holds the Dairy category.
        let categories: Vec<_> = registry.categories().map(|c| c.as_str()).collect();
        assert_eq!(categories, vec!["Dairy", "Grains"]);

        registry.insert_at(removed.position, removed.item).unwrap();
        assert_eq!(names(&registry), vec!["Milk", "Rice", "Eggs"]);
    }

    #[test]
    fn category_change_updates_index() {
        let mut registry = ItemRegistry::new();
        registry.add(item("Milk", "Dairy", 10, None)).unwrap();
        registry
            .update("Milk", &ItemUpdate::default().with_category("Chilled"))
            .unwrap();
        let categories: Vec<_> = registry.categories().map(|c| c.as_str()).collect();
        assert_eq!(categories, vec!["Chilled"]);
    }

    #[test]
    fn purge_removes_only_expired_items() {
        let mut registry = ItemRegistry::new();
        registry.add(item("Milk", "Dairy", 10, Some(date(2023, 1, 5)))).unwrap();
        registry.add(item("Rice", "Grains", 100, None)).unwrap();
        registry.add(item("Eggs", "Dairy", 12, Some(date(2023, 1, 6)))).unwrap();

        let purged = registry.purge_expired(date(2023, 1, 6));
        assert_eq!(purged.len(), 1);
        assert_eq!(purged[0].item.name().as_str(), "Milk");
        assert_eq!(names(&registry), vec!["Rice", "Eggs"]);
    }

    #[test]
    fn padded_names_resolve_to_stored_key() {
        let mut registry = ItemRegistry::new();
        registry.add(item(" Milk ", "Dairy", 10, None)).unwrap();

        assert!(registry.contains(" Milk "));
        assert_eq!(registry.get(" Milk ").unwrap().name().as_str(), "Milk");
        registry.update(" Milk ", &ItemUpdate::quantity(4)).unwrap();
        registry.adjust("Milk  ", 1).unwrap();
        assert_eq!(registry.get("Milk").unwrap().quantity(), 5);

        let removed = registry.delete("  Milk").unwrap();
        assert_eq!(removed.item.name().as_str(), "Milk");
        assert!(registry.is_empty());
    }

    #[test]
    fn list_all_is_restartable() {
        let mut registry = ItemRegistry::new();
        registry.add(item("B", "x", 1, None)).unwrap();
        registry.add(item("A", "x", 1, None)).unwrap();
        assert_eq!(names(&registry), names(&registry));
        assert_eq!(names(&registry), vec!["B", "A"]);
    }
}
