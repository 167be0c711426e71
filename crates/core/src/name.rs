//! Validated string labels used as keys and classifications.

use core::borrow::Borrow;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;
use crate::value_object::ValueObject;

/// Unique name of an inventory item (the registry key).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

/// Free-form classification label of an item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

macro_rules! impl_label_newtype {
    ($t:ty, $what:literal) => {
        impl $t {
            /// Validate and wrap a label. Surrounding whitespace is trimmed;
            /// a label that is empty after trimming is rejected.
            pub fn new(value: impl Into<String>) -> Result<Self, InventoryError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(InventoryError::validation(concat!($what, " cannot be empty")));
                }
                if trimmed.len() == value.len() {
                    Ok(Self(value))
                } else {
                    Ok(Self(trimmed.to_string()))
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $t {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $t {
            type Error = InventoryError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $t {
            type Error = InventoryError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = InventoryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl ValueObject for $t {}
    };
}

impl_label_newtype!(ItemName, "item name");
impl_label_newtype!(Category, "category");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let name = ItemName::new("  Milk ").unwrap();
        assert_eq!(name.as_str(), "Milk");
    }

    #[test]
    fn rejects_blank_labels() {
        match ItemName::new("   ").unwrap_err() {
            InventoryError::Validation(msg) => assert!(msg.contains("item name")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(Category::new("").is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: Category = serde_json::from_str("\"Dairy\"").unwrap();
        assert_eq!(ok.as_str(), "Dairy");
        assert!(serde_json::from_str::<ItemName>("\"  \"").is_err());
    }
}
