//! Tunable constants for the matching, inference and learning pipelines
//!
//! Every value here has a documented default that reproduces the fixed
//! constants from the specification exactly. Adapters that want to tune
//! behavior (e.g. a stricter conflict threshold) construct their own
//! `EngineConfig` and pass it through rather than the core reaching for
//! global state.

use serde::{Deserialize, Serialize};

/// Tokens considered too generic to anchor a learned category mapping on
/// their own (spec.md §4.4 step 2)
pub const DEFAULT_GENERIC_PATTERN_BLOCKLIST: &[&str] = &[
    "transfer",
    "payment",
    "fee",
    "atm",
    "deposit",
    "withdrawal",
    "purchase",
    "debit",
    "credit",
];

/// Engine-wide tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum raw similarity score for a fallback inference candidate
    /// to qualify (spec.md §4.3)
    pub min_confidence: f64,

    /// Confidence boost applied on an exact-pattern mapping hit
    pub learned_boost: f64,

    /// Damping applied to the winning fallback-similarity score
    pub fallback_damping: f64,

    /// Damping applied to description-derived similarity scores
    pub description_damping: f64,

    /// Damping applied to keyword-derived similarity scores
    pub expense_pattern_damping: f64,

    /// Half-width, in days, of the RANGE matching strategy's window
    pub range_window_days: i64,

    /// Minimum `|A∩B| / min(|A|,|B|)` overlap ratio at which two pattern
    /// sets for different categories are treated as conflicting
    /// (spec.md §4.4 step 4)
    pub conflict_overlap_threshold: f64,

    /// Minimum confidence a candidate mapping must carry to be eligible
    /// for learning at all (spec.md §4.4 step 1)
    pub min_learnable_confidence: f64,

    /// Ceiling applied when consolidating occurrence counts into a
    /// single confidence value (spec.md §4.4 step 3)
    pub consolidation_confidence_ceiling: f64,

    /// Tokens too generic to anchor a mapping on their own
    pub generic_pattern_blocklist: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            learned_boost: 0.2,
            fallback_damping: 0.8,
            description_damping: 0.9,
            expense_pattern_damping: 0.8,
            range_window_days: 3,
            conflict_overlap_threshold: 0.5,
            min_learnable_confidence: 0.3,
            consolidation_confidence_ceiling: 0.95,
            generic_pattern_blocklist: DEFAULT_GENERIC_PATTERN_BLOCKLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl EngineConfig {
    /// Whether a normalized pattern is on the generic blocklist
    pub fn is_generic_pattern(&self, pattern: &str) -> bool {
        self.generic_pattern_blocklist.iter().any(|p| p == pattern)
    }
}
