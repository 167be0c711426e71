//! Undo stack of reversible registry mutations.

use serde::{Deserialize, Serialize};

use stockroom_core::{InventoryResult, ItemName};

use crate::item::Item;
use crate::registry::ItemRegistry;

/// One reversible mutation, carrying the prior state needed to invert it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRecord {
    /// An item was added; the inverse deletes it.
    Add { name: ItemName },
    /// An item was changed; the inverse restores `before`.
    Update { before: Item },
    /// An item was removed from `position`; the inverse re-inserts it there.
    Delete { item: Item, position: usize },
}

impl ActionRecord {
    pub fn item_name(&self) -> &ItemName {
        match self {
            ActionRecord::Add { name } => name,
            ActionRecord::Update { before } => before.name(),
            ActionRecord::Delete { item, .. } => item.name(),
        }
    }

    /// Apply the inverse of this record to `registry`.
    ///
    /// Fails with `NotFound` when the item an Add or Update refers to is no
    /// longer present, and with `DuplicateKey` when a deleted name has been
    /// taken again. On failure the registry is unchanged.
    pub fn revert(self, registry: &mut ItemRegistry) -> InventoryResult<UndoneAction> {
        match self {
            ActionRecord::Add { name } => {
                registry.delete(name.as_str())?;
                Ok(UndoneAction::Added(name))
            }
            ActionRecord::Update { before } => {
                let name = before.name().clone();
                registry.replace(before)?;
                Ok(UndoneAction::Updated(name))
            }
            ActionRecord::Delete { item, position } => {
                let name = item.name().clone();
                registry.insert_at(position, item)?;
                Ok(UndoneAction::Deleted(name))
            }
        }
    }
}

/// What an undo reverted, for display to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndoneAction {
    Added(ItemName),
    Updated(ItemName),
    Deleted(ItemName),
}

impl UndoneAction {
    pub fn item_name(&self) -> &ItemName {
        match self {
            UndoneAction::Added(name) | UndoneAction::Updated(name) | UndoneAction::Deleted(name) => {
                name
            }
        }
    }
}

impl core::fmt::Display for UndoneAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UndoneAction::Added(name) => write!(f, "Undid: added item '{name}'"),
            UndoneAction::Updated(name) => write!(f, "Undid: update of item '{name}'"),
            UndoneAction::Deleted(name) => write!(f, "Undid: removal of item '{name}'"),
        }
    }
}

/// Last-in-first-out sequence of action records.
///
/// Depth is unbounded; the session lives for one process and holds at most a
/// few hundred items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionHistory {
    records: Vec<ActionRecord>,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, action: ActionRecord) {
        self.records.push(action);
    }

    pub fn pop(&mut self) -> Option<ActionRecord> {
        self.records.pop()
    }

    /// Most recent record, i.e. what the next undo would revert.
    pub fn peek(&self) -> Option<&ActionRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemUpdate, NewItem};
    use chrono::NaiveDate;
    use stockroom_core::InventoryError;

    fn milk() -> Item {
        NewItem::new("Milk", "Dairy", 10, NaiveDate::from_ymd_opt(2023, 1, 5))
            .validate()
            .unwrap()
    }

    #[test]
    fn history_is_lifo() {
        let mut history = ActionHistory::new();
        history.record(ActionRecord::Add { name: ItemName::new("A").unwrap() });
        history.record(ActionRecord::Add { name: ItemName::new("B").unwrap() });

        assert_eq!(history.peek().unwrap().item_name().as_str(), "B");
        assert_eq!(history.pop().unwrap().item_name().as_str(), "B");
        assert_eq!(history.pop().unwrap().item_name().as_str(), "A");
        assert!(history.pop().is_none());
    }

    #[test]
    fn revert_add_deletes_item() {
        let mut registry = ItemRegistry::new();
        registry.add(milk()).unwrap();

        let undone = ActionRecord::Add { name: milk().name().clone() }
            .revert(&mut registry)
            .unwrap();
        assert_eq!(undone.to_string(), "Undid: added item 'Milk'");
        assert!(registry.is_empty());
        assert!(registry.expiry().is_empty());
    }

    #[test]
    fn revert_add_of_missing_item_is_not_found() {
        let mut registry = ItemRegistry::new();
        let err = ActionRecord::Add { name: milk().name().clone() }
            .revert(&mut registry)
            .unwrap_err();
        assert_eq!(err, InventoryError::NotFound("Milk".to_string()));
    }

    #[test]
    fn revert_update_restores_snapshot() {
        let mut registry = ItemRegistry::new();
        registry.add(milk()).unwrap();
        let before = registry
            .update("Milk", &ItemUpdate::quantity(3).with_expiry_date(None))
            .unwrap();

        ActionRecord::Update { before }.revert(&mut registry).unwrap();
        assert_eq!(registry.get("Milk").unwrap(), &milk());
        assert_eq!(registry.expiry().date_of("Milk"), milk().expiry_date());
    }

    #[test]
    fn revert_delete_reinserts_exact_record() {
        let mut registry = ItemRegistry::new();
        registry.add(milk()).unwrap();
        let removed = registry.delete("Milk").unwrap();

        ActionRecord::Delete { item: removed.item, position: removed.position }
            .revert(&mut registry)
            .unwrap();
        assert_eq!(registry.get("Milk").unwrap(), &milk());
    }

    #[test]
    fn revert_delete_of_reused_name_is_duplicate() {
        let mut registry = ItemRegistry::new();
        registry.add(milk()).unwrap();
        let removed = registry.delete("Milk").unwrap();
        let replacement = NewItem::new("Milk", "Chilled", 2, None).validate().unwrap();
        registry.add(replacement.clone()).unwrap();

        let err = ActionRecord::Delete { item: removed.item, position: removed.position }
            .revert(&mut registry)
            .unwrap_err();
        assert_eq!(err, InventoryError::DuplicateKey("Milk".to_string()));
        assert_eq!(registry.get("Milk").unwrap(), &replacement);
        assert_eq!(registry.len(), 1);
        assert!(registry.expiry().is_empty());
    }

    #[test]
    fn records_serialize_with_action_tag() {
        let record = ActionRecord::Delete { item: milk(), position: 0 };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["action"], "delete");
        assert_eq!(json["item"]["name"], "Milk");

        let back: ActionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
