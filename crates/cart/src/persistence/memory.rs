//! In-memory persistence store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{PersistenceError, PersistenceStore};

#[derive(Debug, Default)]
struct InMemoryPersistenceState {
    entries: HashMap<String, String>,
    fail_on_write: bool,
    writes: usize,
}

/// Map-backed store for testing.
///
/// Clones share their contents, so a second cart store built on a clone
/// sees what the first one wrote, as after a process restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersistence {
    state: Arc<Mutex<InMemoryPersistenceState>>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to reject every write.
    pub fn set_fail_on_write(&self, fail: bool) {
        self.lock().fail_on_write = fail;
    }

    /// Returns the number of successful writes.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, InMemoryPersistenceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PersistenceStore for InMemoryPersistence {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.lock().entries.get(key).cloned())
    }

    fn write(&self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        let mut state = self.lock();
        if state.fail_on_write {
            return Err(PersistenceError::Unavailable("storage quota exceeded".to_string()));
        }
        state.entries.insert(key.to_string(), blob.to_string());
        state.writes += 1;
        Ok(())
    }
}
