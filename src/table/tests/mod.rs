
use crate::engine::handle::{Action, Condition};
use crate::engine::registry::NameRegistry;
use crate::table::DecisionTable;

pub(super) type TestTable = DecisionTable<i32, &'static str>;

/// A table with its own registry so tests never collide on names.
pub(super) fn new_table(name: &str) -> TestTable {
    let registry = NameRegistry::new();
    DecisionTable::with_registry(name, &registry).unwrap()
}

pub(super) fn always(name: &str) -> Condition<i32> {
    Condition::new(name, 0, |_: &[i32]| true)
}

pub(super) fn never(name: &str) -> Condition<i32> {
    Condition::new(name, 0, |_: &[i32]| false)
}

pub(super) fn positive() -> Condition<i32> {
    Condition::new("positive", 1, |args: &[i32]| args[0] > 0)
}

pub(super) fn action(name: &'static str) -> Action<&'static str> {
    Action::new(name, move || name)
}
