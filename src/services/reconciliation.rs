//! Bank-to-ledger reconciliation engine
//!
//! Pure, stateless matching: given bank transactions, YNAB transactions
//! and a strategy, partitions the bank transactions into matched and
//! missing. Holds no connection, no cache, nothing across calls.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::{is_candidate_match, passes_prefilter, MatchStrategy};
use crate::models::{AccountId, BankTransaction, YnabTransaction};

/// Echoed request metadata plus aggregate counts for one reconciliation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub account_id: AccountId,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub strategy: MatchStrategy,
    pub run_timestamp: DateTime<Utc>,
    pub total_bank: usize,
    pub total_ynab: usize,
    pub matched_count: usize,
    pub missing_count: usize,
    pub reconciliation_percentage: f64,
}

/// The partition produced by one reconciliation run, preserving the
/// input order of `bankTxns`
#[derive(Debug, Clone)]
pub struct TransactionMatchResult {
    pub matched: Vec<BankTransaction>,
    pub missing_from_ynab: Vec<BankTransaction>,
}

#[derive(Debug, Default)]
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Match bank transactions against YNAB transactions per §4.2:
    /// sort YNAB by date, binary-search each bank transaction's window,
    /// then linearly scan for the first candidate passing the strategy
    /// predicate. A YNAB transaction may serve as a match for more than
    /// one bank transaction — candidates are never consumed.
    pub fn reconcile(
        &self,
        bank_txns: &[BankTransaction],
        ynab_txns: &[YnabTransaction],
        strategy: MatchStrategy,
    ) -> TransactionMatchResult {
        if bank_txns.is_empty() {
            return TransactionMatchResult {
                matched: Vec::new(),
                missing_from_ynab: Vec::new(),
            };
        }
        if ynab_txns.is_empty() {
            return TransactionMatchResult {
                matched: Vec::new(),
                missing_from_ynab: bank_txns.to_vec(),
            };
        }

        let mut sorted: Vec<&YnabTransaction> = ynab_txns.iter().collect();
        sorted.sort_by_key(|t| t.date);

        let mut matched = Vec::new();
        let mut missing = Vec::new();

        for bank in bank_txns {
            let window = strategy.window(bank.date);
            let start_idx = sorted.partition_point(|t| t.date < window.start);

            let mut found = false;
            for candidate in sorted[start_idx..].iter() {
                if candidate.date > window.end {
                    break;
                }
                if passes_prefilter(bank, *candidate) && is_candidate_match(&strategy, bank, *candidate) {
                    found = true;
                    break;
                }
            }

            if found {
                matched.push(bank.clone());
            } else {
                missing.push(bank.clone());
            }
        }

        debug!(matched = matched.len(), missing = missing.len(), "reconciliation complete");

        TransactionMatchResult {
            matched,
            missing_from_ynab: missing,
        }
    }

    /// Build the summary for a reconciliation run against a single
    /// account/window/strategy. `run_timestamp` is supplied by the
    /// caller rather than generated here — the engine stays pure and
    /// synchronous, with no notion of wall-clock time of its own.
    pub fn summarize(
        &self,
        account_id: AccountId,
        window_start: NaiveDate,
        window_end: NaiveDate,
        strategy: MatchStrategy,
        run_timestamp: DateTime<Utc>,
        bank_txns: &[BankTransaction],
        ynab_txns: &[YnabTransaction],
        result: &TransactionMatchResult,
    ) -> ReconciliationSummary {
        let total_bank = bank_txns.len();
        let total_ynab = ynab_txns.len();
        let matched_count = result.matched.len();
        let missing_count = result.missing_from_ynab.len();
        let reconciliation_percentage = if total_bank > 0 {
            (matched_count as f64 / total_bank as f64) * 100.0
        } else {
            100.0
        };

        ReconciliationSummary {
            account_id,
            window_start,
            window_end,
            strategy,
            run_timestamp,
            total_bank,
            total_ynab,
            matched_count,
            missing_count,
            reconciliation_percentage,
        }
    }
}
