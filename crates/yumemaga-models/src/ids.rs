//! Type-safe ID wrappers.
//!
//! Scope and unit ids originate in the spreadsheet (an issue month such as
//! `2025-11`, a contract row id, a process number such as `A-3`, a step
//! number such as `10`). Checklist item ids may be generated locally.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtypes with common functionality.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new random ID.
            pub fn new() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::new_v4()))
            }

            /// Creates an ID from an existing string.
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Returns the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ScopeId, "scope");
define_id!(UnitId, "unit");
define_id!(ChecklistItemId, "item");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_item_id_prefix() {
        let id = ChecklistItemId::new();
        assert!(id.as_str().starts_with("item-"));
    }

    #[test]
    fn test_spreadsheet_ids_kept_verbatim() {
        assert_eq!(UnitId::from("A-3").as_str(), "A-3");
        assert_eq!(ScopeId::from_string("2025-11").to_string(), "2025-11");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = UnitId::from("10");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"10\"");

        let parsed: UnitId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
