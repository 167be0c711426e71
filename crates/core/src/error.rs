//! Domain error model.

use thiserror::Error;

/// Result type used across the inventory domain.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory-level error.
///
/// Every variant is recoverable: the caller turns it into a user-visible
/// message (the `Display` output is written for that purpose) and the session
/// state is left exactly as it was before the failed call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// An item with this name is already registered.
    #[error("item '{0}' already exists")]
    DuplicateKey(String),

    /// No item with this name is registered.
    #[error("item '{0}' not found")]
    NotFound(String),

    /// A quantity (or the result of a stock adjustment) would be negative.
    #[error("invalid quantity: {0} (stock cannot go negative)")]
    InvalidQuantity(i64),

    /// Undo was requested with nothing recorded.
    #[error("no actions to undo")]
    EmptyHistory,

    /// A value failed validation (e.g. blank name).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl InventoryError {
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateKey(name.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
