// Errors used across the codebase

use thiserror::Error;

use crate::types::{ActionId, CaseId, ConditionId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    // Identity errors
    #[error("A table named '{0}' already exists")]
    DuplicateName(String),

    #[error("Condition '{name}' is already registered with id {id}")]
    DuplicateCondition { name: String, id: ConditionId },

    #[error("Action '{name}' is already registered with id {id}")]
    DuplicateAction { name: String, id: ActionId },

    #[error("A case with the same mask already exists (case {existing})")]
    DuplicateCase { existing: CaseId },

    // Completeness errors
    #[error("Mask must cover all {expected} conditions, got {found} (missing: {missing:?})")]
    IncompleteMask {
        expected: usize,
        found: usize,
        missing: Vec<ConditionId>,
    },

    #[error("Result must cover all {expected} conditions, got {found} (missing: {missing:?})")]
    IncompleteResult {
        expected: usize,
        found: usize,
        missing: Vec<ConditionId>,
    },

    #[error("Expected arguments for {expected} conditions, got {found}")]
    ArgumentCount { expected: usize, found: usize },

    // Reference errors
    #[error("Unknown condition: {0}")]
    UnknownCondition(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    // Shape errors
    #[error("A case must trigger at least one action")]
    EmptyActions,

    #[error("{0} must be referenced either all by handle or all by id")]
    MixedReferences(&'static str),

    #[error("Condition {0} is referenced more than once")]
    RepeatedCondition(ConditionId),

    #[error("Invalid {kind} encoding: {value}")]
    InvalidEncoding { kind: &'static str, value: i8 },

    #[error("Condition '{condition}' takes {expected} arguments, got {found}")]
    ArityMismatch {
        condition: String,
        expected: usize,
        found: usize,
    },
}
