//! Application-layer services composed from the matching and model
//! layers: reconciliation, category inference, mapping learning,
//! import validation, and the create-missing orchestrator

pub mod create_missing;
pub mod import;
pub mod inference;
pub mod learning;
pub mod reconciliation;

pub use create_missing::{CreateMissingOrchestrator, CreateMissingResponse, TransactionCreationResult};
pub use import::{ImportRecordError, ImportResult, ImportStatus, ImportValidator, RawBankRecord};
pub use inference::{CategoryInferenceEngine, InferenceResult};
pub use learning::{CandidateMapping, InMemoryMappingStore, LearningResponse, MappingLearner, MappingStore};
pub use reconciliation::{ReconciliationEngine, ReconciliationSummary, TransactionMatchResult};
