//! Inventory domain for a single-operator shop session.
//!
//! Items live in an [`ItemRegistry`] that keeps an [`ExpiryTracker`] in step;
//! an [`InventorySession`] pairs it with the undo [`ActionHistory`] and hands
//! out read-only [`Reports`]. Everything is in memory and synchronous.

pub mod expiry;
pub mod history;
pub mod item;
pub mod registry;
pub mod report;
pub mod session;

pub use expiry::{ExpiryEntry, ExpiryTracker};
pub use history::{ActionHistory, ActionRecord, UndoneAction};
pub use item::{Item, ItemUpdate, NewItem};
pub use registry::{ItemRegistry, RemovedItem};
pub use report::{ExpiryReportRow, InventoryReportRow, InventorySummary, Reports};
pub use session::InventorySession;

pub use stockroom_core::{Category, InventoryConfig, InventoryError, InventoryResult, ItemName};
