//! Category inference pipeline
//!
//! A pure function of `(transaction, catalog, mappings)` — no cache, no
//! client, no hidden state. Exact pattern matches from the learning
//! store are preferred; similarity against the live catalog is the
//! fallback.

use tracing::debug;

use crate::config::EngineConfig;
use crate::models::{BankTransaction, CategoryMapping, TransactionPattern, YnabCategory};

/// One inference outcome: the chosen category, its confidence, and a
/// human-readable trace of how it was chosen
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResult {
    pub category: crate::models::Category,
    pub confidence: f64,
    pub reasoning: String,
}

#[derive(Debug, Default)]
pub struct CategoryInferenceEngine {
    config: EngineConfig,
}

impl CategoryInferenceEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Run the inference pipeline for a single transaction
    pub fn infer(
        &self,
        transaction: &BankTransaction,
        catalog: &[YnabCategory],
        mappings: &[CategoryMapping],
    ) -> Option<InferenceResult> {
        if catalog.is_empty() {
            return None;
        }

        let pattern = TransactionPattern::from_transaction(transaction).ok();

        if let Some(pattern) = &pattern {
            if let Some(result) = self.exact_pattern_lookup(pattern, mappings) {
                return Some(result);
            }
        }

        self.similarity_fallback(transaction, catalog)
    }

    /// Batch inference: transactions already carrying a non-unknown
    /// category short-circuit with confidence 1.0 and are never re-run
    /// through the pipeline
    pub fn infer_batch(
        &self,
        transactions: &[BankTransaction],
        catalog: &[YnabCategory],
        mappings: &[CategoryMapping],
    ) -> Vec<Option<InferenceResult>> {
        transactions
            .iter()
            .map(|txn| {
                if txn.has_category_inferred() {
                    Some(InferenceResult {
                        category: txn.inferred_category.clone(),
                        confidence: 1.0,
                        reasoning: "Previously inferred".to_string(),
                    })
                } else {
                    self.infer(txn, catalog, mappings)
                }
            })
            .collect()
    }

    fn exact_pattern_lookup(
        &self,
        pattern: &TransactionPattern,
        mappings: &[CategoryMapping],
    ) -> Option<InferenceResult> {
        let best = mappings
            .iter()
            .filter(|m| m.has_exact_match(pattern))
            .max_by(|a, b| {
                a.confidence
                    .partial_cmp(&b.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.occurrence_count.cmp(&b.occurrence_count))
            })?;

        debug!(mapping_id = %best.id, "exact pattern match");

        Some(InferenceResult {
            category: best.category.clone(),
            confidence: (best.confidence + self.config.learned_boost).min(1.0),
            reasoning: format!(
                "Exact pattern match (mapping {}, occurrences {})",
                best.id, best.occurrence_count
            ),
        })
    }

    fn similarity_fallback(
        &self,
        transaction: &BankTransaction,
        catalog: &[YnabCategory],
    ) -> Option<InferenceResult> {
        let merchant = transaction
            .merchant_name
            .as_deref()
            .filter(|m| !m.trim().is_empty() && m.len() >= 3);
        let description = Some(transaction.description.as_str())
            .filter(|d| !d.trim().is_empty() && d.len() >= 3);
        let combined = format!(
            "{} {}",
            transaction.merchant_name.as_deref().unwrap_or(""),
            transaction.description
        )
        .to_lowercase();

        let mut best: Option<(f64, &YnabCategory, &'static str)> = None;

        for category in catalog {
            if let Some(m) = merchant {
                let score = category.similarity(Some(m));
                if score >= self.config.min_confidence && best.as_ref().map_or(true, |(s, _, _)| score > *s) {
                    best = Some((score, category, "merchant"));
                }
            }

            if let Some(d) = description {
                let score = category.similarity(Some(d)) * self.config.description_damping;
                if score >= self.config.min_confidence && best.as_ref().map_or(true, |(s, _, _)| score > *s) {
                    best = Some((score, category, "description"));
                }
            }

            if category
                .inference_keywords()
                .iter()
                .any(|kw| combined.contains(kw.as_str()))
            {
                let raw = category.similarity(Some(&combined));
                let score = raw * self.config.expense_pattern_damping;
                if score >= self.config.min_confidence && best.as_ref().map_or(true, |(s, _, _)| score > *s) {
                    best = Some((score, category, "keyword"));
                }
            }
        }

        best.map(|(score, category, kind)| InferenceResult {
            category: category.to_category(),
            confidence: score * self.config.fallback_damping,
            reasoning: format!("Fallback similarity match: {kind} (raw score {score:.2})"),
        })
    }
}
