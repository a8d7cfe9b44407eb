//! Bank-side and YNAB-side transaction snapshots
//!
//! Both sides are immutable value types owned by the caller for the
//! duration of one request; nothing in this module mutates in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::ids::{AccountId, TransactionId};
use super::money::Money;

/// Which side of the reconciliation a transaction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionSource {
    Bank,
    Ynab,
}

/// A transaction as reported by the bank feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankTransaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub date: NaiveDate,
    pub amount: Money,
    pub description: String,
    pub merchant_name: Option<String>,
    pub memo: Option<String>,
    pub transaction_type: Option<String>,
    pub reference: Option<String>,
    pub inferred_category: Category,
}

impl BankTransaction {
    /// `merchantName` when non-blank, else `description`
    pub fn display_name(&self) -> &str {
        match &self.merchant_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.description,
        }
    }

    /// True iff the amount is negative, or `transactionType == "DEBIT"`
    /// case-insensitively
    pub fn is_debit(&self) -> bool {
        self.amount.is_negative()
            || self
                .transaction_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case("DEBIT"))
    }

    /// True iff a category other than the unknown sentinel has been
    /// assigned
    pub fn has_category_inferred(&self) -> bool {
        !self.inferred_category.is_unknown()
    }

    /// Values are immutable: this yields a new instance carrying the
    /// given category
    pub fn with_category(&self, category: Category) -> Self {
        Self {
            inferred_category: category,
            ..self.clone()
        }
    }
}

/// How a YNAB transaction sits relative to bank reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClearedStatus {
    Uncleared,
    Cleared,
    Reconciled,
}

/// A transaction as it exists in the remote ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YnabTransaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub date: NaiveDate,
    pub amount: Money,
    pub payee_name: Option<String>,
    pub memo: Option<String>,
    pub category: Category,
    pub cleared_status: ClearedStatus,
    pub approved: bool,
    pub flag_color: Option<String>,
}

impl YnabTransaction {
    pub fn is_reconciled(&self) -> bool {
        self.cleared_status == ClearedStatus::Reconciled
    }

    /// Payee name when non-blank, else `"Unknown Payee"`
    pub fn display_name(&self) -> &str {
        match &self.payee_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Unknown Payee",
        }
    }
}

/// The capability bundle the matching/reconciliation engine consumes,
/// so it can operate over bank and YNAB transactions without caring
/// which concrete type supplies it
pub trait Reconcilable {
    fn txn_id(&self) -> &TransactionId;
    fn account_id(&self) -> &AccountId;
    fn date(&self) -> NaiveDate;
    fn amount(&self) -> Money;
    fn display_name(&self) -> &str;
    fn category(&self) -> &Category;
    fn source(&self) -> TransactionSource;
}

impl Reconcilable for BankTransaction {
    fn txn_id(&self) -> &TransactionId {
        &self.id
    }
    fn account_id(&self) -> &AccountId {
        &self.account_id
    }
    fn date(&self) -> NaiveDate {
        self.date
    }
    fn amount(&self) -> Money {
        self.amount
    }
    fn display_name(&self) -> &str {
        BankTransaction::display_name(self)
    }
    fn category(&self) -> &Category {
        &self.inferred_category
    }
    fn source(&self) -> TransactionSource {
        TransactionSource::Bank
    }
}

impl Reconcilable for YnabTransaction {
    fn txn_id(&self) -> &TransactionId {
        &self.id
    }
    fn account_id(&self) -> &AccountId {
        &self.account_id
    }
    fn date(&self) -> NaiveDate {
        self.date
    }
    fn amount(&self) -> Money {
        self.amount
    }
    fn display_name(&self) -> &str {
        YnabTransaction::display_name(self)
    }
    fn category(&self) -> &Category {
        &self.category
    }
    fn source(&self) -> TransactionSource {
        TransactionSource::Ynab
    }
}
