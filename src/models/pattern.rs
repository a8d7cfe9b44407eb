//! Normalized text patterns extracted from a bank transaction
//!
//! Patterns back both the exact-match step of category inference and
//! the mapping learning store's pattern tables.

use std::collections::BTreeSet;

use super::transaction::BankTransaction;
use crate::error::{ReconError, ReconResult};

/// A non-empty set of normalized tokens extracted from a transaction's
/// merchant name and description
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TransactionPattern {
    tokens: BTreeSet<String>,
}

impl TransactionPattern {
    /// Normalize a single string: lowercase, drop characters outside
    /// `[a-z0-9 ]`, collapse whitespace, re-trim
    pub fn normalize(text: &str) -> String {
        let lowered = text.to_lowercase();
        let filtered: String = lowered
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == ' ' { c } else { ' ' })
            .collect();
        filtered.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Tokenize a normalized string into patterns of length ≥ 3
    fn tokens_from(text: &str) -> impl Iterator<Item = String> + '_ {
        Self::normalize(text)
            .split_whitespace()
            .filter(|tok| tok.len() >= 3)
            .map(|tok| tok.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Build from a bank transaction's merchant name and description,
    /// failing if no meaningful token is found
    pub fn from_transaction(txn: &BankTransaction) -> ReconResult<Self> {
        let mut tokens = BTreeSet::new();
        if let Some(merchant) = &txn.merchant_name {
            tokens.extend(Self::tokens_from(merchant));
        }
        tokens.extend(Self::tokens_from(&txn.description));

        if tokens.is_empty() {
            return Err(ReconError::invalid_argument(
                "transaction has no meaningful text to build a pattern from",
            ));
        }
        Ok(Self { tokens })
    }

    /// Build directly from raw text fragments (used by the mapping
    /// learning store when replaying candidate patterns)
    pub fn from_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> ReconResult<Self> {
        let mut tokens = BTreeSet::new();
        for text in texts {
            tokens.extend(Self::tokens_from(text));
        }
        if tokens.is_empty() {
            return Err(ReconError::invalid_argument(
                "no meaningful text to build a pattern from",
            ));
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &BTreeSet<String> {
        &self.tokens
    }

    /// Set intersection against another pattern's tokens
    pub fn intersects(&self, other: &BTreeSet<String>) -> bool {
        self.tokens.iter().any(|t| other.contains(t))
    }
}
