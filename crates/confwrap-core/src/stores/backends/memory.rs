//! In-process key/value store.

use std::collections::BTreeMap;

use crate::coercion::RawValue;
use crate::keyspace::NativePath;
use crate::stores::errors::StoreResult;
use crate::stores::traits::{ReadableStore, WritableStore};

/// Flat, ordered, writable map. Mainly for tests and for layering
/// programmatic overrides.
///
/// Keys are already canonical: `biff.baz` is one key, not a path. Lookups are
/// case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl ReadableStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn raw_value(&self, key: &str) -> StoreResult<Option<RawValue>> {
        Ok(self.entries.get(key).map(|value| RawValue::from(value.as_str())))
    }

    fn enumerate(&self) -> StoreResult<Vec<NativePath>> {
        Ok(self
            .entries
            .keys()
            .map(|key| NativePath::from_names([key.as_str()]))
            .collect())
    }

    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        Ok(self.entries.contains_key(key))
    }
}

impl WritableStore for MemoryStore {
    /// A flat map has no intermediate containers, so `create_missing` has no effect.
    fn write(&mut self, key: &str, value: &str, _create_missing: bool) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
