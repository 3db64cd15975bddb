// Callable handles for conditions and actions
use crate::err::TableError;
use crate::types::{ActionId, ConditionId, Outcome};

use std::fmt;
use std::sync::Arc;

type ConditionFn<A> = dyn Fn(&[A]) -> bool + Send + Sync;
type ActionFn<R> = dyn Fn() -> R + Send + Sync;

/// A named predicate with a fixed number of positional arguments.
///
/// Cloning a `Condition` shares the underlying function, so clones compare
/// as the same condition. Two conditions built from identical closures are
/// still distinct.
pub struct Condition<A> {
    name: String,
    arity: usize,
    func: Arc<ConditionFn<A>>,
}

/// A named procedure triggered by matching cases.
///
/// Identity follows the same rules as [`Condition`].
pub struct Action<R> {
    name: String,
    func: Arc<ActionFn<R>>,
}

impl<A> Condition<A> {
    /// Creates a condition from a predicate.
    ///
    /// # Arguments
    /// * `name` - Label used in errors, logs and the rendered grid
    /// * `arity` - Number of positional arguments the predicate expects
    /// * `func` - The predicate; it is only called with exactly `arity` arguments
    ///
    /// # Examples
    /// ```
    /// use decision_table::{Condition, Outcome};
    ///
    /// let between = Condition::new("between", 3, |args: &[i32]| {
    ///     args[1] <= args[0] && args[0] <= args[2]
    /// });
    /// assert_eq!(between.evaluate(&[5, 1, 10]), Ok(Outcome::True));
    /// assert!(between.evaluate(&[5]).is_err());
    /// ```
    pub fn new<F>(name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&[A]) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Invokes the predicate, rejecting argument lists of the wrong length.
    ///
    /// # Returns
    /// * `Ok(Outcome)` with the predicate's truth value
    /// * `Err(TableError::ArityMismatch)` if `args.len()` differs from the arity
    pub fn evaluate(&self, args: &[A]) -> Result<Outcome, TableError> {
        if args.len() != self.arity {
            return Err(TableError::ArityMismatch {
                condition: self.name.clone(),
                expected: self.arity,
                found: args.len(),
            });
        }

        Ok(Outcome::from((self.func)(args)))
    }

    /// True if both handles share the same function object.
    pub fn same_as(&self, other: &Condition<A>) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl<R> Action<R> {
    /// Creates an action from a procedure.
    ///
    /// # Arguments
    /// * `name` - Label used in errors, logs and the rendered grid
    /// * `func` - Called by [`Action::call`] and by `DecisionTable::run_actions`
    ///
    /// # Examples
    /// ```
    /// use decision_table::Action;
    ///
    /// let notify = Action::new("notify", || "sent");
    /// assert_eq!(notify.name(), "notify");
    /// assert_eq!(notify.call(), "sent");
    /// ```
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the procedure and returns its output.
    pub fn call(&self) -> R {
        (self.func)()
    }

    pub fn same_as(&self, other: &Action<R>) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

// Manual impls so that A and R don't need to be Clone/Debug

impl<A> Clone for Condition<A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            arity: self.arity,
            func: Arc::clone(&self.func),
        }
    }
}

impl<R> Clone for Action<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<A> fmt::Debug for Condition<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl<R> fmt::Debug for Action<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<A> PartialEq for Condition<A> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<R> PartialEq for Action<R> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

/// Reference to a condition, either by handle or by registered id.
pub enum ConditionRef<A> {
    Handle(Condition<A>),
    Id(ConditionId),
}

/// Reference to an action, either by handle or by registered id.
pub enum ActionRef<R> {
    Handle(Action<R>),
    Id(ActionId),
}

impl<A> ConditionRef<A> {
    pub fn is_id(&self) -> bool {
        matches!(self, ConditionRef::Id(_))
    }

    // Used in error messages
    pub(crate) fn describe(&self) -> String {
        match self {
            ConditionRef::Handle(condition) => format!("'{}'", condition.name()),
            ConditionRef::Id(id) => format!("id {}", id),
        }
    }
}

impl<R> ActionRef<R> {
    pub fn is_id(&self) -> bool {
        matches!(self, ActionRef::Id(_))
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            ActionRef::Handle(action) => format!("'{}'", action.name()),
            ActionRef::Id(id) => format!("id {}", id),
        }
    }
}

impl<A> From<ConditionId> for ConditionRef<A> {
    fn from(id: ConditionId) -> Self {
        ConditionRef::Id(id)
    }
}

impl<A> From<Condition<A>> for ConditionRef<A> {
    fn from(condition: Condition<A>) -> Self {
        ConditionRef::Handle(condition)
    }
}

impl<A> From<&Condition<A>> for ConditionRef<A> {
    fn from(condition: &Condition<A>) -> Self {
        ConditionRef::Handle(condition.clone())
    }
}

impl<R> From<ActionId> for ActionRef<R> {
    fn from(id: ActionId) -> Self {
        ActionRef::Id(id)
    }
}

impl<R> From<Action<R>> for ActionRef<R> {
    fn from(action: Action<R>) -> Self {
        ActionRef::Handle(action)
    }
}

impl<R> From<&Action<R>> for ActionRef<R> {
    fn from(action: &Action<R>) -> Self {
        ActionRef::Handle(action.clone())
    }
}

/// Fails with `MixedReferences` unless every flag agrees.
pub(crate) fn ensure_homogeneous<I>(is_id: I, what: &'static str) -> Result<(), TableError>
where
    I: IntoIterator<Item = bool>,
{
    let mut flags = is_id.into_iter();
    if let Some(first) = flags.next() {
        if flags.any(|flag| flag != first) {
            return Err(TableError::MixedReferences(what));
        }
    }
    Ok(())
}
