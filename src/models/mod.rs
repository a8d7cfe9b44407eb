//! Domain value types: money, identifiers, categories, transactions,
//! text patterns and learned mappings

pub mod category;
pub mod ids;
pub mod mapping;
pub mod money;
pub mod pattern;
pub mod transaction;

pub use category::{Category, CategoryType, YnabCategory};
pub use ids::{AccountId, BudgetId, CategoryId, CategoryMappingId, TransactionId};
pub use mapping::CategoryMapping;
pub use money::Money;
pub use pattern::TransactionPattern;
pub use transaction::{BankTransaction, ClearedStatus, Reconcilable, TransactionSource, YnabTransaction};
