// A single row of the decision table
use crate::types::{ActionId, ConditionId, Expect, Mask, Outcome};

use indexmap::IndexMap;

pub type MaskMap = IndexMap<ConditionId, Mask>;
pub type ResultMap = IndexMap<ConditionId, Expect>;

/// A rule binding a pattern of condition outcomes to a list of actions.
///
/// `mask` and `result` hold one entry per registered condition, keyed by
/// condition id in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    mask: MaskMap,
    result: ResultMap,
    actions: Vec<ActionId>,
}

impl Case {
    pub(crate) fn new(mask: MaskMap, result: ResultMap, actions: Vec<ActionId>) -> Self {
        Case {
            mask,
            result,
            actions,
        }
    }

    pub fn mask(&self) -> &MaskMap {
        &self.mask
    }

    pub fn result(&self) -> &ResultMap {
        &self.result
    }

    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    pub fn includes(&self, action: ActionId) -> bool {
        self.actions.contains(&action)
    }

    /// Applies the mask to an outcome vector indexed by condition id.
    ///
    /// Returns `None` if `outcomes` has no entry for one of the masked
    /// conditions, e.g. a vector computed before another condition was
    /// registered.
    pub fn masked(&self, outcomes: &[Outcome]) -> Option<ResultMap> {
        self.mask
            .iter()
            .map(|(&id, mask)| outcomes.get(id).map(|&outcome| (id, mask.apply(outcome))))
            .collect()
    }

    /// Exact, entry-for-entry equality of the masked outcomes and the result.
    /// A short outcome vector never matches.
    pub fn matches(&self, outcomes: &[Outcome]) -> bool {
        self.masked(outcomes)
            .is_some_and(|masked| masked == self.result)
    }

    // New conditions are "don't care" for every existing case
    pub(crate) fn backfill(&mut self, id: ConditionId) {
        self.mask.insert(id, Mask::Ignore);
        self.result.insert(id, Expect::DontCare);
    }
}
