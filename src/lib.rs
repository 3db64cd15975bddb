// Src files
pub mod err;
pub mod types;

// Internal impl directories
pub mod engine;
pub mod table;

// Public API
pub use engine::case::{Case, MaskMap, ResultMap};
pub use engine::handle::{Action, ActionRef, Condition, ConditionRef};
pub use engine::registry::NameRegistry;
pub use err::TableError;
pub use table::DecisionTable;
pub use types::{ActionId, CaseId, ConditionId, Expect, Mask, Outcome};
