//! `stockroom-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the inventory
//! session: the error model, validated labels and configuration.

pub mod config;
pub mod entity;
pub mod error;
pub mod name;
pub mod value_object;

pub use config::InventoryConfig;
pub use entity::Entity;
pub use error::{InventoryError, InventoryResult};
pub use name::{Category, ItemName};
pub use value_object::ValueObject;
