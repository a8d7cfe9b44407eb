//! Learned category mappings
//!
//! A `CategoryMapping` ties a set of normalized text patterns to a
//! category, with a confidence that grows as the same pattern set is
//! observed again. Owned by the mapping learning store.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::ids::CategoryMappingId;
use super::pattern::TransactionPattern;
use crate::error::{ReconError, ReconResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMapping {
    pub id: CategoryMappingId,
    pub category: Category,
    pub text_patterns: BTreeSet<String>,
    pub confidence: f64,
    pub occurrence_count: u32,
}

impl CategoryMapping {
    /// Construct, rejecting an empty or blank pattern set, an
    /// out-of-range confidence, or a zero occurrence count
    pub fn new(
        id: CategoryMappingId,
        category: Category,
        text_patterns: BTreeSet<String>,
        confidence: f64,
        occurrence_count: u32,
    ) -> ReconResult<Self> {
        if text_patterns.is_empty() {
            return Err(ReconError::invalid_argument(
                "category mapping must have at least one text pattern",
            ));
        }
        if text_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(ReconError::invalid_argument(
                "category mapping text patterns must not be blank",
            ));
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ReconError::invalid_argument(
                "category mapping confidence must be in [0, 1]",
            ));
        }
        if occurrence_count < 1 {
            return Err(ReconError::invalid_argument(
                "category mapping occurrence count must be ≥ 1",
            ));
        }
        Ok(Self {
            id,
            category,
            text_patterns,
            confidence,
            occurrence_count,
        })
    }

    /// True iff this mapping's patterns and the candidate's patterns
    /// share at least one token
    pub fn has_exact_match(&self, candidate: &TransactionPattern) -> bool {
        candidate.intersects(&self.text_patterns)
    }

    /// Record another occurrence, bumping confidence by a
    /// diminishing-returns amount
    pub fn with_new_occurrence(&self) -> Self {
        let occurrence_count = self.occurrence_count + 1;
        let bump = (0.1_f64).min(0.1 / (occurrence_count as f64).sqrt());
        let confidence = (self.confidence + bump).min(1.0);
        Self {
            occurrence_count,
            confidence,
            ..self.clone()
        }
    }

    /// Union in additional patterns, returning a new mapping
    pub fn with_additional_patterns(&self, patterns: &BTreeSet<String>) -> Self {
        let mut text_patterns = self.text_patterns.clone();
        text_patterns.extend(patterns.iter().cloned());
        Self {
            text_patterns,
            ..self.clone()
        }
    }

    pub fn is_high_confidence(&self) -> bool {
        self.confidence >= 0.8 && self.occurrence_count >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::CategoryType;
    use crate::models::ids::CategoryId;

    fn mapping(patterns: &[&str], confidence: f64, occurrence_count: u32) -> CategoryMapping {
        let category =
            Category::new(CategoryId::new("c1").unwrap(), "Groceries", CategoryType::BankInferred)
                .unwrap();
        CategoryMapping::new(
            CategoryMappingId::new("m1").unwrap(),
            category,
            patterns.iter().map(|s| s.to_string()).collect(),
            confidence,
            occurrence_count,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_empty_patterns() {
        let category =
            Category::new(CategoryId::new("c1").unwrap(), "Groceries", CategoryType::BankInferred)
                .unwrap();
        let result = CategoryMapping::new(
            CategoryMappingId::new("m1").unwrap(),
            category,
            BTreeSet::new(),
            0.5,
            1,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        let category =
            Category::new(CategoryId::new("c1").unwrap(), "Groceries", CategoryType::BankInferred)
                .unwrap();
        let patterns: BTreeSet<String> = ["starbucks".to_string()].into();
        assert!(CategoryMapping::new(
            CategoryMappingId::new("m1").unwrap(),
            category.clone(),
            patterns.clone(),
            1.5,
            1
        )
        .is_err());
        assert!(CategoryMapping::new(
            CategoryMappingId::new("m1").unwrap(),
            category,
            patterns,
            -0.1,
            1
        )
        .is_err());
    }

    #[test]
    fn test_rejects_zero_occurrence_count() {
        let category =
            Category::new(CategoryId::new("c1").unwrap(), "Groceries", CategoryType::BankInferred)
                .unwrap();
        let patterns: BTreeSet<String> = ["starbucks".to_string()].into();
        assert!(CategoryMapping::new(
            CategoryMappingId::new("m1").unwrap(),
            category,
            patterns,
            0.5,
            0
        )
        .is_err());
    }

    #[test]
    fn test_with_new_occurrence_bumps_confidence_and_count() {
        let m = mapping(&["starbucks"], 0.5, 1);
        let updated = m.with_new_occurrence();
        assert_eq!(updated.occurrence_count, 2);
        assert!(updated.confidence > m.confidence);
        assert!(updated.confidence <= 1.0);
    }

    #[test]
    fn test_with_new_occurrence_caps_at_one() {
        let m = mapping(&["starbucks"], 0.99, 1);
        let updated = m.with_new_occurrence();
        assert_eq!(updated.confidence, 1.0);
    }

    #[test]
    fn test_with_additional_patterns_unions() {
        let m = mapping(&["starbucks"], 0.5, 1);
        let extra: BTreeSet<String> = ["seattle".to_string()].into();
        let updated = m.with_additional_patterns(&extra);
        assert!(updated.text_patterns.contains("starbucks"));
        assert!(updated.text_patterns.contains("seattle"));
        // original untouched
        assert!(!m.text_patterns.contains("seattle"));
    }

    #[test]
    fn test_is_high_confidence() {
        let low = mapping(&["starbucks"], 0.9, 1);
        assert!(!low.is_high_confidence()); // occurrence_count < 2
        let high = mapping(&["starbucks"], 0.85, 3);
        assert!(high.is_high_confidence());
        let low_conf = mapping(&["starbucks"], 0.5, 5);
        assert!(!low_conf.is_high_confidence());
    }

    proptest::proptest! {
        #[test]
        fn prop_with_new_occurrence_is_monotone(
            confidence in 0.0_f64..=1.0,
            occurrence_count in 1_u32..1000,
        ) {
            let m = mapping(&["starbucks"], confidence, occurrence_count);
            let updated = m.with_new_occurrence();
            prop_assert!(updated.occurrence_count > m.occurrence_count);
            prop_assert!(updated.confidence >= m.confidence);
            prop_assert!(updated.confidence <= 1.0);
        }
    }
}
