//! Create-missing orchestrator
//!
//! Submits bank transactions with no YNAB counterpart to the remote
//! ledger, one at a time, continuing past individual failures.

use crate::models::{BankTransaction, BudgetId, ClearedStatus, TransactionId};
use crate::ports::LedgerClient;
use crate::{AccountId, ReconError};

const MAX_BATCH_SIZE: usize = 100;

/// Outcome for a single bank transaction submitted to the ledger
#[derive(Debug, Clone)]
pub enum TransactionCreationResult {
    Success {
        source: BankTransaction,
        new_ynab_id: TransactionId,
    },
    Failure {
        source: BankTransaction,
        error: String,
    },
}

impl TransactionCreationResult {
    pub fn success(source: BankTransaction, new_ynab_id: TransactionId) -> Self {
        Self::Success { source, new_ynab_id }
    }

    pub fn failure(source: BankTransaction, reason: impl Into<String>) -> Self {
        Self::Failure {
            source,
            error: format!("Failed to create transaction: {}", reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Aggregate response for one create-missing run
#[derive(Debug, Clone, Default)]
pub struct CreateMissingResponse {
    pub results: Vec<TransactionCreationResult>,
}

impl CreateMissingResponse {
    pub fn successes(&self) -> impl Iterator<Item = &TransactionCreationResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &TransactionCreationResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

pub struct CreateMissingOrchestrator<'a> {
    ledger: &'a dyn LedgerClient,
}

impl<'a> CreateMissingOrchestrator<'a> {
    pub fn new(ledger: &'a dyn LedgerClient) -> Self {
        Self { ledger }
    }

    pub fn create_missing(
        &self,
        budget_id: &BudgetId,
        ynab_account_id: &AccountId,
        missing: &[BankTransaction],
    ) -> Result<CreateMissingResponse, ReconError> {
        if missing.is_empty() || missing.len() > MAX_BATCH_SIZE {
            return Err(ReconError::PreconditionFailed(format!(
                "create-missing batch must contain between 1 and {MAX_BATCH_SIZE} transactions, got {}",
                missing.len()
            )));
        }

        let mut results = Vec::with_capacity(missing.len());
        for bank_txn in missing {
            let request = crate::models::YnabTransaction {
                id: TransactionId::new("pending").expect("literal id is non-blank"),
                account_id: ynab_account_id.clone(),
                date: bank_txn.date,
                amount: bank_txn.amount,
                payee_name: bank_txn.merchant_name.clone(),
                memo: bank_txn.memo.clone(),
                category: bank_txn.inferred_category.clone(),
                cleared_status: ClearedStatus::Uncleared,
                approved: true,
                flag_color: None,
            };

            match self.ledger.create_transaction(budget_id, request) {
                Ok(created) => results.push(TransactionCreationResult::success(bank_txn.clone(), created.id)),
                Err(e) => results.push(TransactionCreationResult::failure(bank_txn.clone(), e.to_string())),
            }
        }

        Ok(CreateMissingResponse { results })
    }
}
