//! Deterministic reconciliation and categorization engine for syncing
//! a bank feed against a YNAB-style budgeting ledger.
//!
//! This crate is a pure library: it has no HTTP client, no CSV reader,
//! no persistence driver of its own. Everything it needs from the
//! outside world comes in through the traits in [`ports`]; the only
//! concrete adapter shipped here is [`services::InMemoryMappingStore`],
//! a reference implementation for tests and small deployments.

pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod ports;
pub mod services;

pub use config::EngineConfig;
pub use error::{ReconError, ReconResult};
pub use models::{
    AccountId, BankTransaction, BudgetId, Category, CategoryId, CategoryMapping, CategoryMappingId,
    CategoryType, ClearedStatus, Money, Reconcilable, TransactionId, TransactionPattern,
    TransactionSource, YnabCategory, YnabTransaction,
};
