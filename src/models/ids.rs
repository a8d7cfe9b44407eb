//! Opaque string-wrapped identifiers
//!
//! Unlike a UUID, these ids are minted by the external systems we
//! reconcile against (the bank, the remote ledger) — ours to validate,
//! not to generate. Each wrapper only guarantees non-empty, non-whitespace
//! content; the macro mirrors the newtype-per-entity-type pattern used
//! throughout the model layer so ids from different entities can never
//! be mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ReconError, ReconResult};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Construct from a caller-supplied string, rejecting blank input
            pub fn new(value: impl Into<String>) -> ReconResult<Self> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ReconError::invalid_argument(concat!(
                        stringify!($name),
                        " must not be blank"
                    )));
                }
                Ok(Self(value))
            }

            /// The underlying string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(AccountId);
define_id!(BudgetId);
define_id!(TransactionId);
define_id!(CategoryId);
define_id!(CategoryMappingId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank() {
        assert!(AccountId::new("").is_err());
        assert!(AccountId::new("   ").is_err());
        assert!(AccountId::new("\t\n").is_err());
    }

    #[test]
    fn test_accepts_nonblank() {
        let id = AccountId::new("acc_123").unwrap();
        assert_eq!(id.as_str(), "acc_123");
        assert_eq!(id.to_string(), "acc_123");
    }

    #[test]
    fn test_equality() {
        let a = TransactionId::new("t1").unwrap();
        let b = TransactionId::new("t1").unwrap();
        let c = TransactionId::new("t2").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serialization() {
        let id = CategoryId::new("cat_1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"cat_1\"");
        let deserialized: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
