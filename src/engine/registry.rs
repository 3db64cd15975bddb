// Registry of table names
use crate::err::TableError;

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Set of table names that have been claimed.
///
/// Tables created with [`DecisionTable::new`](crate::DecisionTable::new) claim
/// their name in the process-wide registry returned by [`NameRegistry::global`].
/// Names are never released when a table is dropped.
#[derive(Debug, Default)]
pub struct NameRegistry {
    names: Mutex<HashSet<String>>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by every table in the process.
    pub fn global() -> &'static NameRegistry {
        static GLOBAL: OnceLock<NameRegistry> = OnceLock::new();
        GLOBAL.get_or_init(NameRegistry::new)
    }

    /// Records `name`, failing if it was claimed before.
    pub fn claim(&self, name: &str) -> Result<(), TableError> {
        if !self.lock().insert(name.to_string()) {
            return Err(TableError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forgets every claimed name.
    pub fn reset(&self) {
        self.lock().clear();
    }

    // The set stays consistent even if a holder panicked
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.names.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
