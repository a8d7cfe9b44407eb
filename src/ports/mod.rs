//! Outbound collaborator traits
//!
//! The engine never talks to a concrete HTTP client, CSV reader or
//! database — it depends on these traits, and adapters (outside the
//! scope of this crate) provide the concrete wiring. Resource
//! acquisition is scoped to a single call: an implementation opens
//! whatever connection it needs on entry and releases it on every exit
//! path, success or error.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ReconResult;
use crate::models::{AccountId, BankTransaction, BudgetId, TransactionId, YnabCategory, YnabTransaction};

/// A YNAB-style budget, as listed by the remote ledger
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: BudgetId,
    pub name: String,
}

/// A bank or cash account tracked within a budget
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub on_budget: bool,
}

/// The remote ledger, read/write
pub trait LedgerClient: Send + Sync {
    fn list_budgets(&self) -> ReconResult<Vec<Budget>>;
    fn get_budget(&self, budget_id: &BudgetId) -> ReconResult<Option<Budget>>;
    fn list_accounts(&self, budget_id: &BudgetId) -> ReconResult<Vec<Account>>;
    fn list_categories(&self, budget_id: &BudgetId) -> ReconResult<Vec<YnabCategory>>;
    fn list_transactions(&self, budget_id: &BudgetId) -> ReconResult<Vec<YnabTransaction>>;
    fn list_transactions_since(&self, budget_id: &BudgetId, since: DateTime<Utc>) -> ReconResult<Vec<YnabTransaction>>;
    fn list_account_transactions(&self, budget_id: &BudgetId, account_id: &AccountId) -> ReconResult<Vec<YnabTransaction>>;
    fn create_transaction(&self, budget_id: &BudgetId, txn: YnabTransaction) -> ReconResult<YnabTransaction>;
    fn update_transaction(&self, budget_id: &BudgetId, txn_id: &TransactionId, txn: YnabTransaction) -> ReconResult<YnabTransaction>;
    fn is_healthy(&self) -> bool;
}

/// The bank feed, read-only
pub trait BankTransactionSource: Send + Sync {
    /// Inclusive on both ends
    fn list_by_account_and_window(&self, account_id: &AccountId, from: NaiveDate, to: NaiveDate) -> ReconResult<Vec<BankTransaction>>;
    /// Ids with no matching transaction are silently omitted
    fn find_by_ids(&self, ids: &[TransactionId]) -> ReconResult<Vec<BankTransaction>>;
}

/// The live YNAB category catalog, read-only
pub trait YnabCategoryCatalog: Send + Sync {
    /// Already filtered to `!hidden && !deleted` at the boundary
    fn list_available(&self) -> ReconResult<Vec<YnabCategory>>;
}

#[cfg(test)]
pub use fixtures::*;
