use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::{Category, Entity, InventoryError, InventoryResult, ItemName};

/// One inventory record.
///
/// Fields are private so every `Item` in existence went through validation:
/// the name and category are non-blank and the quantity is non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    name: ItemName,
    category: Category,
    quantity: u64,
    expiry_date: Option<NaiveDate>,
    unit_price: Option<u64>,
}

impl Item {
    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }

    /// Price per unit in the smallest currency unit, if known.
    pub fn unit_price(&self) -> Option<u64> {
        self.unit_price
    }

    /// Stock value (`quantity * unit_price`); zero when no price is set.
    pub fn total_value(&self) -> u64 {
        self.unit_price
            .map_or(0, |price| price.saturating_mul(self.quantity))
    }

    /// True when the item has an expiry date strictly before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|date| date < today)
    }

    /// Apply a validated change set, returning the resulting record.
    ///
    /// `self` is left untouched so the caller can keep it as the prior
    /// snapshot.
    pub(crate) fn updated(&self, update: &ItemUpdate) -> InventoryResult<Item> {
        let mut next = self.clone();
        if let Some(quantity) = update.quantity {
            next.quantity = checked_quantity(quantity)?;
        }
        if let Some(category) = &update.category {
            next.category = Category::new(category.as_str())?;
        }
        if let Some(expiry_date) = update.expiry_date {
            next.expiry_date = expiry_date;
        }
        if let Some(unit_price) = update.unit_price {
            next.unit_price = unit_price;
        }
        Ok(next)
    }

    /// The record after adding `delta` units (negative removes stock).
    pub(crate) fn adjusted(&self, delta: i64) -> InventoryResult<Item> {
        let current = i64::try_from(self.quantity)
            .map_err(|_| InventoryError::validation("stock exceeds adjustable range"))?;
        let new_quantity = current
            .checked_add(delta)
            .ok_or_else(|| InventoryError::validation("stock adjustment overflows"))?;
        let mut next = self.clone();
        next.quantity = checked_quantity(new_quantity)?;
        Ok(next)
    }
}

impl Entity for Item {
    type Id = ItemName;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

fn checked_quantity(quantity: i64) -> InventoryResult<u64> {
    u64::try_from(quantity).map_err(|_| InventoryError::InvalidQuantity(quantity))
}

/// User-entered fields for a new item (unvalidated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub expiry_date: Option<NaiveDate>,
    pub unit_price: Option<u64>,
}

impl NewItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: i64,
        expiry_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            quantity,
            expiry_date,
            unit_price: None,
        }
    }

    pub fn with_unit_price(mut self, unit_price: u64) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    /// Validate the draft into an [`Item`].
    pub fn validate(self) -> InventoryResult<Item> {
        Ok(Item {
            name: ItemName::new(self.name)?,
            category: Category::new(self.category)?,
            quantity: checked_quantity(self.quantity)?,
            expiry_date: self.expiry_date,
            unit_price: self.unit_price,
        })
    }
}

/// Partial change set for an existing item. `None` leaves a field as is.
///
/// `expiry_date` and `unit_price` are doubly optional: `Some(None)` clears the
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub quantity: Option<i64>,
    pub category: Option<String>,
    pub expiry_date: Option<Option<NaiveDate>>,
    pub unit_price: Option<Option<u64>>,
}

impl ItemUpdate {
    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub fn expiry_date(expiry_date: Option<NaiveDate>) -> Self {
        Self {
            expiry_date: Some(expiry_date),
            ..Self::default()
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_expiry_date(mut self, expiry_date: Option<NaiveDate>) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    pub fn with_unit_price(mut self, unit_price: Option<u64>) -> Self {
        self.unit_price = Some(unit_price);
        self
    }
}
