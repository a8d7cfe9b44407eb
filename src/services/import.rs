//! Import validator
//!
//! Parses external bank records into `BankTransaction` values,
//! detecting in-batch duplicates by a simple intra-batch fingerprint.
//! Never touches a repository; callers persist the accepted
//! transactions themselves.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::models::{AccountId, BankTransaction, Category, Money, TransactionId};

/// One raw record as received from an external feed, before validation
#[derive(Debug, Clone)]
pub struct RawBankRecord {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub merchant_name: Option<String>,
}

/// Per-record failure, carrying the 1-based line number of the record
/// that failed
#[derive(Debug, Clone)]
pub struct ImportRecordError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    Success,
    PartialSuccess,
    Failed,
}

#[derive(Debug, Clone)]
pub struct ImportResult {
    pub status: ImportStatus,
    pub total_processed: usize,
    pub successful_imports: usize,
    pub duplicates_skipped: usize,
    pub errors: Vec<ImportRecordError>,
    pub accepted: Vec<BankTransaction>,
}

const MERCHANT_NAME_MAX_LEN: usize = 50;

pub struct ImportValidator<F>
where
    F: Fn() -> TransactionId,
{
    id_factory: F,
}

impl<F> ImportValidator<F>
where
    F: Fn() -> TransactionId,
{
    /// `id_factory` mints a fresh `TransactionId` for each accepted
    /// record; the core never generates ids itself
    pub fn new(id_factory: F) -> Self {
        Self { id_factory }
    }

    pub fn import(&self, account_id: &AccountId, records: &[RawBankRecord]) -> ImportResult {
        let total_processed = records.len();
        let mut errors = Vec::new();
        let mut accepted = Vec::new();
        let mut duplicates_skipped = 0;
        let mut seen = HashSet::new();

        for (idx, record) in records.iter().enumerate() {
            let line = idx + 1;
            match self.validate_record(account_id, record) {
                Ok(txn) => {
                    let fingerprint = (
                        txn.account_id.clone(),
                        txn.date,
                        txn.amount.milliunits(),
                        txn.description.clone(),
                    );
                    if !seen.insert(fingerprint) {
                        duplicates_skipped += 1;
                        continue;
                    }
                    accepted.push(txn);
                }
                Err(message) => errors.push(ImportRecordError { line, message }),
            }
        }

        let successful_imports = accepted.len();
        let status = if errors.is_empty() {
            ImportStatus::Success
        } else if successful_imports > 0 {
            ImportStatus::PartialSuccess
        } else {
            ImportStatus::Failed
        };

        ImportResult {
            status,
            total_processed,
            successful_imports,
            duplicates_skipped,
            errors,
            accepted,
        }
    }

    fn validate_record(&self, account_id: &AccountId, record: &RawBankRecord) -> Result<BankTransaction, String> {
        let date = NaiveDate::from_str(record.date.trim())
            .map_err(|e| format!("invalid date '{}': {e}", record.date))?;

        let amount = Money::parse(&record.amount).map_err(|e| e.to_string())?;

        if record.description.trim().is_empty() {
            return Err("description must not be blank".to_string());
        }

        let merchant_name = record
            .merchant_name
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| record.description.clone());
        let merchant_name: String = merchant_name.chars().take(MERCHANT_NAME_MAX_LEN).collect();

        let transaction_type = if amount.is_negative() { "DEBIT" } else { "CREDIT" };

        Ok(BankTransaction {
            id: (self.id_factory)(),
            account_id: account_id.clone(),
            date,
            amount,
            description: record.description.clone(),
            merchant_name: Some(merchant_name),
            memo: None,
            transaction_type: Some(transaction_type.to_string()),
            reference: None,
            inferred_category: Category::unknown(),
        })
    }
}
