//! Memoizing definition cache.
//!
//! Definitions are built once from their declaration the first time they are
//! requested and shared for the lifetime of the cache. Concurrent first
//! access to the same key runs the builder at most once: the map lock only
//! guards slot creation, and each slot is an initialize-once cell.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Cache of lazily built, shared definitions keyed by declaration identity.
pub struct DefinitionCache<K, V> {
    slots: RwLock<HashMap<K, Arc<OnceLock<Arc<V>>>>>,
}

impl<K, V> Default for DefinitionCache<K, V> {
    fn default() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> DefinitionCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the definition for `key`, building it with `build` on first use.
    ///
    /// `build` runs at most once per key even if several threads request the
    /// same key simultaneously; the others wait for and share its result.
    pub fn get_or_init(&self, key: &K, build: impl FnOnce() -> V) -> Arc<V> {
        let slot = self.slot(key);
        Arc::clone(slot.get_or_init(|| Arc::new(build())))
    }

    /// Returns the definition for `key` if it has already been built.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).and_then(|slot| slot.get().cloned())
    }

    /// Number of keys that have a built definition.
    #[must_use]
    pub fn len(&self) -> usize {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.get().is_some()).count()
    }

    /// Returns true if no definition has been built yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: &K) -> Arc<OnceLock<Arc<V>>> {
        {
            let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = slots.get(key) {
                return Arc::clone(slot);
            }
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key.clone()).or_default())
    }
}

impl<K, V> fmt::Debug for DefinitionCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self
            .slots
            .read()
            .map_or(0, |slots| slots.len());
        f.debug_struct("DefinitionCache")
            .field("slots", &count)
            .finish()
    }
}
