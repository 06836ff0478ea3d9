//! Generic keyed registry.
//!
//! Provides a thread-safe mapping from keys to values with strict
//! (`register`) and lenient (`set`) insertion, and default resolution for
//! absent keys through the `DefaultPolicy` chain.

use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use parking_lot::RwLock;
use tracing::{debug, trace};

use regmap_protocols::default::DefaultPolicy;
use regmap_protocols::error::RegistryError;
use regmap_protocols::CancellationToken;

/// Thread-safe registry mapping keys to values.
///
/// Any number of readers (`get`, `has`, `range`, snapshot extraction) run
/// concurrently; mutations (`register`, `set`, `delete`, `clear`) are
/// serialized and exclude readers for their duration. Each key holds at
/// most one value.
///
/// [`get_default`](Registry::get_default) resolves absent keys through the
/// value type's [`DefaultPolicy`] implementation.
pub struct Registry<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> Registry<K, V>
where
    K: Eq + Hash + fmt::Debug,
{
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a value only if `key` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyExists`] if `key` holds a value.
    pub fn register(&self, key: K, value: V) -> Result<(), RegistryError> {
        let mut entries = self.entries.write();
        if entries.contains_key(&key) {
            return Err(RegistryError::AlreadyExists {
                type_name: type_name::<V>(),
                key: format!("{key:?}"),
            });
        }
        trace!("registered {:?} ({})", key, type_name::<V>());
        entries.insert(key, value);
        Ok(())
    }

    /// Insert a value only if `key` is absent, treating an occupied key as
    /// a programming bug.
    ///
    /// # Panics
    ///
    /// Panics if `key` already holds a value. Intended for startup-time
    /// registration where a duplicate is a logic error, not a runtime
    /// condition to handle.
    pub fn must_register(&self, key: K, value: V) {
        if let Err(err) = self.register(key, value) {
            panic!("{err}");
        }
    }

    /// Insert or overwrite the value for `key`.
    pub fn set(&self, key: K, value: V) {
        let mut entries = self.entries.write();
        trace!("set {:?} ({})", key, type_name::<V>());
        entries.insert(key, value);
    }

    /// Remove the entry for `key`, returning its value. A no-op returning
    /// `None` if `key` is absent.
    pub fn delete(&self, key: &K) -> Option<V> {
        let removed = self.entries.write().remove(key);
        if removed.is_some() {
            trace!("deleted {:?} ({})", key, type_name::<V>());
        }
        removed
    }

    /// Remove all entries. The registry itself stays valid for holders.
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        debug!("clearing {} entries ({})", entries.len(), type_name::<V>());
        entries.clear();
    }

    /// Look up the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if `key` is absent.
    pub fn get(&self, key: &K) -> Result<V, RegistryError>
    where
        V: Clone,
    {
        let entries = self.entries.read();
        entries
            .get(key)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                type_name: type_name::<V>(),
                key: format!("{key:?}"),
            })
    }

    /// Look up the value for `key`, resolving a default when absent.
    ///
    /// The read lock is held only for the presence probe and released
    /// before the value type's loader runs, so a loader may take its time,
    /// or even consult this registry. Concurrent misses on the same key may
    /// each compute a default; the result is not written back.
    ///
    /// # Errors
    ///
    /// Propagates a loader failure verbatim as [`RegistryError::Loader`].
    pub async fn get_default(
        &self,
        token: &CancellationToken,
        key: &K,
    ) -> Result<V, RegistryError>
    where
        K: Sync,
        V: DefaultPolicy<K> + Clone,
    {
        {
            let entries = self.entries.read();
            if let Some(value) = entries.get(key) {
                return Ok(value.clone());
            }
        }
        debug!("resolving default for {:?} ({})", key, type_name::<V>());
        self.resolve_default(token, key).await
    }

    /// Run the value type's default-resolution chain for `key`, ignoring
    /// registry contents.
    ///
    /// # Errors
    ///
    /// Propagates a loader failure verbatim as [`RegistryError::Loader`].
    pub async fn resolve_default(
        &self,
        token: &CancellationToken,
        key: &K,
    ) -> Result<V, RegistryError>
    where
        K: Sync,
        V: DefaultPolicy<K>,
    {
        Ok(V::load_default(token, key).await?)
    }

    /// Whether `key` holds a value.
    pub fn has(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Visit each entry in unspecified order. Iteration stops when the
    /// visitor returns `false`.
    ///
    /// The visitor runs under the read lock and must not call mutating
    /// methods on this registry.
    pub fn range<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let entries = self.entries.read();
        for (key, value) in entries.iter() {
            if !visit(key, value) {
                return;
            }
        }
    }

    /// Snapshot of all keys present at call time.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.entries.read().keys().cloned().collect()
    }

    /// Snapshot of all values present at call time.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.entries.read().values().cloned().collect()
    }

    /// Independent copy of the whole mapping as present at call time.
    pub fn snapshot(&self) -> HashMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.entries.read().clone()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<K, V> Default for Registry<K, V>
where
    K: Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
