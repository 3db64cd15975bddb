use crate::engine::case::{Case, MaskMap, ResultMap};
use crate::engine::handle::{ensure_homogeneous, Action, ActionRef, Condition, ConditionRef};
use crate::engine::registry::NameRegistry;
use crate::err::TableError;
use crate::types::{ActionId, CaseId, ConditionId, Expect, Mask, Outcome};

use indexmap::IndexMap;
use tracing::{debug, info};

mod render;

#[cfg(test)]
mod tests;

/// A decision table: conditions, actions and the cases that connect them.
///
/// `A` is the argument type conditions are invoked with, `R` is what actions
/// return.
///
/// # Examples
/// ```
/// use decision_table::{Action, Condition, DecisionTable, Expect, Mask};
///
/// let mut table = DecisionTable::<i32, &str>::new("doc_example")?;
///
/// let positive = Condition::new("positive", 1, |args: &[i32]| args[0] > 0);
/// let even = Condition::new("even", 1, |args: &[i32]| args[0] % 2 == 0);
/// let shout = Action::new("shout", || "positive and even");
///
/// table.register_condition(&positive)?;
/// table.register_condition(&even)?;
/// table.register_action(&shout)?;
///
/// table.add_case(
///     [(&positive, Mask::Check), (&even, Mask::Check)],
///     [(&positive, Expect::True), (&even, Expect::True)],
///     [&shout],
/// )?;
///
/// let actions = table.resolve_actions([(&positive, vec![4]), (&even, vec![4])])?;
/// assert_eq!(actions, vec![shout.clone()]);
///
/// let actions = table.resolve_actions([(&positive, vec![3]), (&even, vec![3])])?;
/// assert!(actions.is_empty());
/// # Ok::<(), decision_table::TableError>(())
/// ```
pub struct DecisionTable<A, R = ()> {
    name: String,
    conditions: Vec<Condition<A>>,
    actions: Vec<Action<R>>,
    cases: Vec<Case>,
}

impl<A, R> DecisionTable<A, R> {
    /// Creates an empty table, claiming `name` in the process-wide registry.
    ///
    /// # Arguments
    /// * `name` - Name of the table, unique among every table created in the process
    ///
    /// # Returns
    /// * `Ok(DecisionTable)` with no conditions, actions or cases
    /// * `Err(TableError::DuplicateName)` if the name was claimed before
    ///
    /// # Examples
    /// ```ignore
    /// let table: DecisionTable<i32> = DecisionTable::new("pricing")?;
    /// assert!(DecisionTable::<i32>::new("pricing").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, TableError> {
        Self::with_registry(name, NameRegistry::global())
    }

    /// Creates an empty table, claiming `name` in the given registry.
    ///
    /// Used to keep names of tables in tests or embedded engines apart from
    /// the process-wide registry.
    ///
    /// # Examples
    /// ```ignore
    /// let registry = NameRegistry::new();
    /// let table: DecisionTable<i32> = DecisionTable::with_registry("pricing", &registry)?;
    /// registry.reset();
    /// ```
    pub fn with_registry(
        name: impl Into<String>,
        registry: &NameRegistry,
    ) -> Result<Self, TableError> {
        let name = name.into();
        registry.claim(&name)?;

        info!(table = %name, "created decision table");

        Ok(Self {
            name,
            conditions: Vec::new(),
            actions: Vec::new(),
            cases: Vec::new(),
        })
    }

    /// Gets the table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a condition and returns its id.
    ///
    /// Every existing case treats the new condition as "don't care".
    ///
    /// # Arguments
    /// * `condition` - Handle to register; clones of it refer to the same condition
    ///
    /// # Returns
    /// * `Ok(ConditionId)` - the next id, starting at 0
    /// * `Err(TableError::DuplicateCondition)` if the handle is already registered
    ///
    /// # Examples
    /// ```ignore
    /// let adult = Condition::new("adult", 1, |args: &[u32]| args[0] >= 18);
    /// assert_eq!(table.register_condition(&adult)?, 0);
    /// ```
    pub fn register_condition(
        &mut self,
        condition: &Condition<A>,
    ) -> Result<ConditionId, TableError> {
        if let Some(id) = self.condition_id(condition) {
            return Err(TableError::DuplicateCondition {
                name: condition.name().to_string(),
                id,
            });
        }

        let id = self.conditions.len();
        self.conditions.push(condition.clone());
        for case in &mut self.cases {
            case.backfill(id);
        }

        info!(
            table = %self.name,
            condition = condition.name(),
            id,
            backfilled = self.cases.len(),
            "registered condition"
        );
        Ok(id)
    }

    /// Registers an action and returns its id.
    ///
    /// # Returns
    /// * `Ok(ActionId)` - the next id, starting at 0
    /// * `Err(TableError::DuplicateAction)` if the handle is already registered
    pub fn register_action(&mut self, action: &Action<R>) -> Result<ActionId, TableError> {
        if let Some(id) = self.action_id(action) {
            return Err(TableError::DuplicateAction {
                name: action.name().to_string(),
                id,
            });
        }

        let id = self.actions.len();
        self.actions.push(action.clone());

        info!(table = %self.name, action = action.name(), id, "registered action");
        Ok(id)
    }

    /// Adds a case and returns its id.
    ///
    /// `mask` and `result` need one entry for every registered condition;
    /// don't-care slots are given explicitly as `Mask::Ignore` and
    /// `Expect::DontCare`. Conditions and actions are referenced either all by
    /// handle or all by id within each argument.
    ///
    /// # Arguments
    /// * `mask` - `(condition, Mask)` pairs, one per registered condition
    /// * `result` - `(condition, Expect)` pairs, one per registered condition
    /// * `actions` - Non-empty list of registered actions, in trigger order
    ///
    /// # Returns
    /// * `Ok(CaseId)` - the next id, starting at 0
    /// * `Err(TableError)` if a reference is unknown or mixed, a condition is
    ///   missing or repeated, `actions` is empty, or another case has the same mask.
    ///   The table is left unchanged.
    ///
    /// # Examples
    /// ```ignore
    /// // Adults trigger `admit`, whatever the other condition says
    /// table.add_case(
    ///     [(&adult, Mask::Check), (&member, Mask::Ignore)],
    ///     [(&adult, Expect::True), (&member, Expect::DontCare)],
    ///     [&admit],
    /// )?;
    /// ```
    pub fn add_case<KM, KR, KA, M, E, X>(
        &mut self,
        mask: M,
        result: E,
        actions: X,
    ) -> Result<CaseId, TableError>
    where
        KM: Into<ConditionRef<A>>,
        KR: Into<ConditionRef<A>>,
        KA: Into<ActionRef<R>>,
        M: IntoIterator<Item = (KM, Mask)>,
        E: IntoIterator<Item = (KR, Expect)>,
        X: IntoIterator<Item = KA>,
    {
        let mask: MaskMap = self.resolve_conditions(mask)?;
        let missing = self.missing_conditions(&mask);
        if !missing.is_empty() {
            return Err(TableError::IncompleteMask {
                expected: self.conditions.len(),
                found: mask.len(),
                missing,
            });
        }

        let result: ResultMap = self.resolve_conditions(result)?;
        let missing = self.missing_conditions(&result);
        if !missing.is_empty() {
            return Err(TableError::IncompleteResult {
                expected: self.conditions.len(),
                found: result.len(),
                missing,
            });
        }

        let actions = self.resolve_actions_refs(actions)?;

        if let Some(existing) = self.cases.iter().position(|case| *case.mask() == mask) {
            return Err(TableError::DuplicateCase { existing });
        }

        let id = self.cases.len();
        info!(table = %self.name, case = id, actions = ?actions, "added case");

        self.cases.push(Case::new(mask, result, actions));
        Ok(id)
    }

    /// Evaluates every condition once and returns the outcomes by condition id.
    ///
    /// `condition_args` must hold exactly one argument list per registered
    /// condition. Every argument list is checked against its condition's
    /// arity before any condition is called.
    ///
    /// # Returns
    /// * `Ok(Vec<Outcome>)` indexed by condition id
    /// * `Err(TableError::ArgumentCount)` if a condition is missing or extra
    /// * `Err(TableError::ArityMismatch)` if an argument list has the wrong length
    pub fn outcomes<K, I>(&self, condition_args: I) -> Result<Vec<Outcome>, TableError>
    where
        K: Into<ConditionRef<A>>,
        I: IntoIterator<Item = (K, Vec<A>)>,
    {
        let entries: Vec<(ConditionRef<A>, Vec<A>)> = condition_args
            .into_iter()
            .map(|(key, args)| (key.into(), args))
            .collect();

        let expected = self.conditions.len();
        if entries.len() != expected {
            return Err(TableError::ArgumentCount {
                expected,
                found: entries.len(),
            });
        }

        ensure_homogeneous(entries.iter().map(|(key, _)| key.is_id()), "conditions")?;

        let mut args: IndexMap<ConditionId, Vec<A>> = IndexMap::with_capacity(expected);
        for (key, values) in entries {
            let id = self.resolve_condition(&key)?;
            args.entry(id).or_insert(values);
        }

        // A repeated condition leaves another one without arguments
        if args.len() != expected {
            return Err(TableError::ArgumentCount {
                expected,
                found: args.len(),
            });
        }

        // Validate every argument list before any predicate runs
        let mut ordered: Vec<(&Condition<A>, &[A])> = Vec::with_capacity(expected);
        for (id, condition) in self.conditions.iter().enumerate() {
            let condition_args = args.get(&id).ok_or(TableError::ArgumentCount {
                expected,
                found: args.len(),
            })?;
            if condition_args.len() != condition.arity() {
                return Err(TableError::ArityMismatch {
                    condition: condition.name().to_string(),
                    expected: condition.arity(),
                    found: condition_args.len(),
                });
            }
            ordered.push((condition, condition_args.as_slice()));
        }

        ordered
            .into_iter()
            .map(|(condition, condition_args)| condition.evaluate(condition_args))
            .collect()
    }

    /// Returns the actions of every matching case, in case registration order.
    ///
    /// Actions listed by several matching cases appear once per case.
    ///
    /// # Arguments
    /// * `condition_args` - `(condition, arguments)` pairs, exactly one per
    ///   registered condition, all by handle or all by id
    ///
    /// # Examples
    /// ```ignore
    /// let actions = table.resolve_actions([(&adult, vec![30]), (&member, vec![0])])?;
    /// for action in &actions {
    ///     println!("{}", action.name());
    /// }
    /// ```
    pub fn resolve_actions<K, I>(&self, condition_args: I) -> Result<Vec<Action<R>>, TableError>
    where
        K: Into<ConditionRef<A>>,
        I: IntoIterator<Item = (K, Vec<A>)>,
    {
        let outcomes = self.outcomes(condition_args)?;

        let mut triggered = Vec::new();
        let mut matched_cases = Vec::new();
        for (id, case) in self.cases.iter().enumerate() {
            let masked = case.masked(&outcomes);
            let matched = masked.as_ref() == Some(case.result());

            debug!(
                table = %self.name,
                case = id,
                actions = ?case.actions(),
                expected = ?encode(case.result()),
                masked = ?masked.as_ref().map(encode),
                matched,
                "evaluated case"
            );

            if matched {
                matched_cases.push(id);
                triggered.extend(case.actions().iter().map(|&action| self.actions[action].clone()));
            }
        }

        debug!(
            table = %self.name,
            matched = ?matched_cases,
            triggered = triggered.len(),
            "resolved actions"
        );
        Ok(triggered)
    }

    /// Resolves the matching actions and calls each of them in order.
    ///
    /// # Returns
    /// * `Ok(Vec<R>)` with one output per triggered action
    /// * `Err(TableError)` under the same conditions as [`Self::resolve_actions`]
    pub fn run_actions<K, I>(&self, condition_args: I) -> Result<Vec<R>, TableError>
    where
        K: Into<ConditionRef<A>>,
        I: IntoIterator<Item = (K, Vec<A>)>,
    {
        let actions = self.resolve_actions(condition_args)?;
        Ok(actions.iter().map(Action::call).collect())
    }

    // Accessors

    /// Gets a registered condition by id.
    pub fn condition(&self, id: ConditionId) -> Option<&Condition<A>> {
        self.conditions.get(id)
    }

    pub fn action(&self, id: ActionId) -> Option<&Action<R>> {
        self.actions.get(id)
    }

    pub fn case(&self, id: CaseId) -> Option<&Case> {
        self.cases.get(id)
    }

    pub fn conditions(&self) -> &[Condition<A>] {
        &self.conditions
    }

    pub fn actions(&self) -> &[Action<R>] {
        &self.actions
    }

    /// Gets all cases in registration order.
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Id of a registered condition, looked up by identity.
    pub fn condition_id(&self, condition: &Condition<A>) -> Option<ConditionId> {
        self.conditions
            .iter()
            .position(|registered| registered.same_as(condition))
    }

    /// Id of a registered action, looked up by identity.
    pub fn action_id(&self, action: &Action<R>) -> Option<ActionId> {
        self.actions
            .iter()
            .position(|registered| registered.same_as(action))
    }

    // Resolution helpers

    /// Resolves condition keys to ids, keeping the values.
    /// The returned map is sorted by condition id.
    fn resolve_conditions<K, V, I>(&self, entries: I) -> Result<IndexMap<ConditionId, V>, TableError>
    where
        K: Into<ConditionRef<A>>,
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(ConditionRef<A>, V)> = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();

        ensure_homogeneous(entries.iter().map(|(key, _)| key.is_id()), "conditions")?;

        let mut resolved = IndexMap::with_capacity(entries.len());
        for (key, value) in entries {
            let id = self.resolve_condition(&key)?;
            if resolved.insert(id, value).is_some() {
                return Err(TableError::RepeatedCondition(id));
            }
        }

        resolved.sort_keys();
        Ok(resolved)
    }

    fn resolve_condition(&self, key: &ConditionRef<A>) -> Result<ConditionId, TableError> {
        let id = match key {
            ConditionRef::Handle(condition) => self.condition_id(condition),
            ConditionRef::Id(id) => Some(*id).filter(|id| *id < self.conditions.len()),
        };
        id.ok_or_else(|| TableError::UnknownCondition(key.describe()))
    }

    fn resolve_actions_refs<K, I>(&self, actions: I) -> Result<Vec<ActionId>, TableError>
    where
        K: Into<ActionRef<R>>,
        I: IntoIterator<Item = K>,
    {
        let refs: Vec<ActionRef<R>> = actions.into_iter().map(Into::into).collect();
        if refs.is_empty() {
            return Err(TableError::EmptyActions);
        }

        ensure_homogeneous(refs.iter().map(ActionRef::is_id), "actions")?;

        refs.iter()
            .map(|key| {
                let id = match key {
                    ActionRef::Handle(action) => self.action_id(action),
                    ActionRef::Id(id) => Some(*id).filter(|id| *id < self.actions.len()),
                };
                id.ok_or_else(|| TableError::UnknownAction(key.describe()))
            })
            .collect()
    }

    fn missing_conditions<V>(&self, entries: &IndexMap<ConditionId, V>) -> Vec<ConditionId> {
        (0..self.conditions.len())
            .filter(|id| !entries.contains_key(id))
            .collect()
    }
}

// Integer form of a result map for diagnostics -- e.g. [1, -1, 0]
fn encode(result: &ResultMap) -> Vec<i8> {
    result.values().map(|expect| expect.as_i8()).collect()
}
