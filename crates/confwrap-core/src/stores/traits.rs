//! Store capability traits.

use crate::coercion::RawValue;
use crate::keyspace::{self, KeyCase, NativePath};

use super::errors::StoreResult;

/// Read capability every configuration store provides.
///
/// Implementors supply single-leaf lookup and leaf enumeration. Canonical key
/// listing, prefix queries and membership have default implementations built on
/// the key space model; stores override them when they can answer more cheaply
/// or must refuse.
pub trait ReadableStore: Send + Sync {
    /// Short store name used in logs and error messages (e.g., "ini", "hive").
    fn name(&self) -> &'static str;

    /// Looks up exactly one leaf. A missing key is `Ok(None)`, not an error.
    fn raw_value(&self, key: &str) -> StoreResult<Option<RawValue>>;

    /// Lists the native path of every leaf.
    fn enumerate(&self) -> StoreResult<Vec<NativePath>>;

    /// Delimiter joining canonical key segments.
    fn delimiter(&self) -> char {
        '.'
    }

    /// Key comparison policy for lookups and membership.
    fn key_case(&self) -> KeyCase {
        KeyCase::Sensitive
    }

    /// All canonical keys.
    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(keyspace::normalize(self.enumerate()?, self.delimiter()))
    }

    /// Canonical keys starting with `prefix`.
    fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        Ok(keyspace::prefix_query(self.keys()?, prefix))
    }

    /// Whether `key` names a leaf.
    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        let case = self.key_case();
        Ok(self
            .keys()?
            .iter()
            .any(|candidate| keyspace::key_matches(candidate, key, case)))
    }
}

/// Write capability of mutable stores.
pub trait WritableStore: ReadableStore {
    /// Stores `value` under `key`.
    ///
    /// Missing intermediate containers (subkeys, sections) are created only
    /// when `create_missing` is true; otherwise the write fails with
    /// [`StoreError::KeyNotFound`](super::StoreError::KeyNotFound).
    fn write(&mut self, key: &str, value: &str, create_missing: bool) -> StoreResult<()>;

    /// Deletes the leaf at `key` and/or the container subtree of that name.
    /// Removing a missing key is a no-op.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: ReadableStore + ?Sized> ReadableStore for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn raw_value(&self, key: &str) -> StoreResult<Option<RawValue>> {
        (**self).raw_value(key)
    }

    fn enumerate(&self) -> StoreResult<Vec<NativePath>> {
        (**self).enumerate()
    }

    fn delimiter(&self) -> char {
        (**self).delimiter()
    }

    fn key_case(&self) -> KeyCase {
        (**self).key_case()
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }

    fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        (**self).keys_with_prefix(prefix)
    }

    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        (**self).contains_key(key)
    }
}

impl<S: WritableStore + ?Sized> WritableStore for Box<S> {
    fn write(&mut self, key: &str, value: &str, create_missing: bool) -> StoreResult<()> {
        (**self).write(key, value, create_missing)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

impl<S: ReadableStore + ?Sized> ReadableStore for &S {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn raw_value(&self, key: &str) -> StoreResult<Option<RawValue>> {
        (**self).raw_value(key)
    }

    fn enumerate(&self) -> StoreResult<Vec<NativePath>> {
        (**self).enumerate()
    }

    fn delimiter(&self) -> char {
        (**self).delimiter()
    }

    fn key_case(&self) -> KeyCase {
        (**self).key_case()
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }

    fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        (**self).keys_with_prefix(prefix)
    }

    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        (**self).contains_key(key)
    }
}
