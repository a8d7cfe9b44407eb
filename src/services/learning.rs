//! Mapping learning store
//!
//! Owns two logical tables — `mappings` and `patterns` — behind a
//! single lock so a reader never observes one table updated without
//! the other. The teacher's storage layer keeps independent `RwLock`s
//! per table; that shape doesn't hold here because `save` must look
//! atomic across both tables at once, so a single `Mutex` guards the
//! combined state instead.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{ReconError, ReconResult};
use crate::models::{Category, CategoryMapping, CategoryMappingId, TransactionPattern};

/// Read/write port over the mapping learning store, per §4.4
pub trait MappingStore: Send + Sync {
    fn save(&self, mapping: CategoryMapping) -> ReconResult<()>;
    fn save_all(&self, mappings: Vec<CategoryMapping>) -> ReconResult<()>;
    fn find_mappings_for_pattern(&self, pattern: &TransactionPattern) -> Vec<CategoryMapping>;
    fn find_best_mapping_for_pattern(&self, pattern: &TransactionPattern) -> Option<CategoryMapping>;
    fn find_mappings_for_category(&self, category: &Category) -> Vec<CategoryMapping>;
    fn find_mappings_containing_any_pattern(&self, patterns: &BTreeSet<String>) -> Vec<CategoryMapping>;
    /// Every mapping currently held, ordered `confidence desc,
    /// occurrenceCount desc`. Implementation plumbing used by the
    /// consolidation pass to look up existing per-category overlap; not
    /// part of the original port surface.
    fn find_all_mappings(&self) -> Vec<CategoryMapping>;
}

/// Reference in-memory adapter. HTTP/SQL/file-backed adapters are
/// explicitly out of scope for this crate.
#[derive(Default)]
pub struct InMemoryMappingStore {
    // the two logical tables, guarded together so `save` never leaves
    // one updated without the other
    state: Mutex<HashMap<CategoryMappingId, CategoryMapping>>,
}

impl InMemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_by_confidence(mut mappings: Vec<CategoryMapping>) -> Vec<CategoryMapping> {
        mappings.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.occurrence_count.cmp(&a.occurrence_count))
        });
        mappings
    }
}

impl MappingStore for InMemoryMappingStore {
    fn save(&self, mapping: CategoryMapping) -> ReconResult<()> {
        let mut state = self.state.lock().map_err(|_| ReconError::StoreError("lock poisoned".into()))?;
        state.insert(mapping.id.clone(), mapping);
        Ok(())
    }

    fn save_all(&self, mappings: Vec<CategoryMapping>) -> ReconResult<()> {
        let mut state = self.state.lock().map_err(|_| ReconError::StoreError("lock poisoned".into()))?;
        // apply in input order within the single locked scope; a
        // HashMap insert cannot fail, so there is no partial-failure
        // case to roll back here
        for mapping in mappings {
            state.insert(mapping.id.clone(), mapping);
        }
        Ok(())
    }

    fn find_mappings_for_pattern(&self, pattern: &TransactionPattern) -> Vec<CategoryMapping> {
        let state = self.state.lock().expect("lock poisoned");
        let matches: Vec<CategoryMapping> = state
            .values()
            .filter(|m| m.has_exact_match(pattern))
            .cloned()
            .collect();
        Self::sorted_by_confidence(matches)
    }

    fn find_best_mapping_for_pattern(&self, pattern: &TransactionPattern) -> Option<CategoryMapping> {
        self.find_mappings_for_pattern(pattern).into_iter().next()
    }

    fn find_mappings_for_category(&self, category: &Category) -> Vec<CategoryMapping> {
        let state = self.state.lock().expect("lock poisoned");
        let matches: Vec<CategoryMapping> = state
            .values()
            .filter(|m| m.category.id == category.id)
            .cloned()
            .collect();
        Self::sorted_by_confidence(matches)
    }

    fn find_mappings_containing_any_pattern(&self, patterns: &BTreeSet<String>) -> Vec<CategoryMapping> {
        let state = self.state.lock().expect("lock poisoned");
        let matches: Vec<CategoryMapping> = state
            .values()
            .filter(|m| m.text_patterns.iter().any(|p| patterns.contains(p)))
            .cloned()
            .collect();
        Self::sorted_by_confidence(matches)
    }

    fn find_all_mappings(&self) -> Vec<CategoryMapping> {
        let state = self.state.lock().expect("lock poisoned");
        Self::sorted_by_confidence(state.values().cloned().collect())
    }
}

/// One learning-batch candidate, before consolidation
#[derive(Debug, Clone)]
pub struct CandidateMapping {
    pub category: Category,
    pub text_patterns: BTreeSet<String>,
    pub confidence: f64,
}

/// Aggregate response for one learning batch; counts must satisfy
/// `saved_new + updated_existing + skipped == total_requested`
#[derive(Debug, Clone, Default)]
pub struct LearningResponse {
    pub total_requested: usize,
    pub saved_new: usize,
    pub updated_existing: usize,
    pub skipped: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Producer-side consolidation and conflict detection over a batch of
/// candidate mappings, per §4.4
pub struct MappingLearner<'a> {
    store: &'a dyn MappingStore,
    config: &'a EngineConfig,
}

impl<'a> MappingLearner<'a> {
    pub fn new(store: &'a dyn MappingStore, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn learn(&self, candidates: Vec<CandidateMapping>) -> LearningResponse {
        let total_requested = candidates.len();
        let mut response = LearningResponse {
            total_requested,
            ..Default::default()
        };

        // step 1 + 2: reject low-confidence or purely-generic candidates
        let eligible: Vec<CandidateMapping> = candidates
            .into_iter()
            .filter(|c| {
                if c.confidence < self.config.min_learnable_confidence {
                    response.skipped += 1;
                    return false;
                }
                if c.text_patterns.iter().all(|p| self.config.is_generic_pattern(p)) {
                    response.skipped += 1;
                    return false;
                }
                true
            })
            .collect();

        // step 3: consolidate by exact pattern-set equality
        let mut groups: Vec<(BTreeSet<String>, Category, f64, u32)> = Vec::new();
        for candidate in eligible {
            if let Some(group) = groups.iter_mut().find(|(patterns, _, _, _)| *patterns == candidate.text_patterns) {
                group.2 = group.2.max(candidate.confidence);
                group.3 += 1;
            } else {
                groups.push((candidate.text_patterns, candidate.category, candidate.confidence, 1));
            }
        }

        let consolidated: Vec<(BTreeSet<String>, Category, f64, u32)> = groups
            .into_iter()
            .map(|(patterns, category, max_confidence, total_count)| {
                let confidence = if total_count > 1 {
                    (max_confidence + 0.05 * (1.0 + (total_count as f64 - 1.0)).log2())
                        .min(self.config.consolidation_confidence_ceiling)
                } else {
                    max_confidence
                };
                (patterns, category, confidence, total_count)
            })
            .collect();

        let existing_all = self.store.find_all_mappings();
        let mut accepted = Vec::new();

        // step 4: conflict detection against existing store mappings
        // for the same category
        for (patterns, category, confidence, occurrence_count) in consolidated {
            let conflict = existing_all.iter().any(|existing| {
                if existing.category.id == category.id {
                    return false;
                }
                let overlap = patterns.intersection(&existing.text_patterns).count();
                let min_len = patterns.len().min(existing.text_patterns.len());
                min_len > 0 && (overlap as f64 / min_len as f64) >= self.config.conflict_overlap_threshold
            });

            if conflict {
                // every original candidate consolidated into this group
                // counts toward `skipped`, so the response invariant
                // (savedNew + updatedExisting + skipped == totalRequested)
                // holds regardless of how many candidates consolidated
                response.skipped += occurrence_count as usize;
                response.warnings.push(format!(
                    "skipped conflicting mapping for category '{}': overlapping patterns with a different category",
                    category.name
                ));
                warn!(category = %category.name, "skipping conflicting mapping");
                continue;
            }

            let already_existed = existing_all.iter().any(|existing| existing.text_patterns == patterns);
            if already_existed {
                response.updated_existing += occurrence_count as usize;
            } else {
                response.saved_new += 1;
                response.updated_existing += occurrence_count.saturating_sub(1) as usize;
            }

            let id = CategoryMappingId::new(format!("mapping_{}", patterns.iter().cloned().collect::<Vec<_>>().join("_")));
            let id = match id {
                Ok(id) => id,
                Err(e) => {
                    response.errors.push(e.to_string());
                    response.skipped += occurrence_count as usize;
                    if already_existed {
                        response.updated_existing = response.updated_existing.saturating_sub(occurrence_count as usize);
                    } else {
                        response.saved_new = response.saved_new.saturating_sub(1);
                        response.updated_existing =
                            response.updated_existing.saturating_sub(occurrence_count.saturating_sub(1) as usize);
                    }
                    continue;
                }
            };

            match CategoryMapping::new(id, category, patterns, confidence, occurrence_count) {
                Ok(mapping) => accepted.push(mapping),
                Err(e) => {
                    response.errors.push(e.to_string());
                }
            }
        }

        // step 5: persist accepted mappings in one batch save
        if !accepted.is_empty() {
            if let Err(e) = self.store.save_all(accepted) {
                response.errors.push(e.to_string());
            }
        }

        debug!(
            saved_new = response.saved_new,
            updated_existing = response.updated_existing,
            skipped = response.skipped,
            "mapping learning batch complete"
        );

        response
    }
}
