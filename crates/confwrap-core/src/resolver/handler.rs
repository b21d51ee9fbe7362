use std::fmt::Display;

use tracing::{debug, info};

use crate::coercion::{self, Coerce, CoercionPolicy, RawValue};
use crate::stores::{ReadableStore, StoreError, StoreResult, WritableStore};

/// Typed access to one bound store.
///
/// A resolver owns its store and keeps no state of its own between calls.
/// Reads are available for every store; `set`, `set_with` and `delete` exist
/// only when the store is a [`WritableStore`].
///
/// Calls returning `Err` do so for backend failures, required keys that are
/// missing, and strict conversions that fail. Lenient reads never fail on a
/// value's content.
#[derive(Debug)]
pub struct Resolver<S> {
    store: S,
}

impl<S: ReadableStore> Resolver<S> {
    pub fn new(store: S) -> Self {
        info!(event = "core.resolver.bound", store = store.name());
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Releases the store.
    pub fn close(self) {
        info!(event = "core.resolver.closed", store = self.store.name());
    }

    /// Every canonical key of the store.
    pub fn all_keys(&self) -> StoreResult<Vec<String>> {
        self.store.keys()
    }

    pub fn all_keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        self.store.keys_with_prefix(prefix)
    }

    pub fn contains_key(&self, key: &str) -> StoreResult<bool> {
        self.store.contains_key(key)
    }

    /// Reads a required value, converting strictly.
    ///
    /// # Errors
    ///
    /// [`StoreError::KeyNotFound`] when the key is absent,
    /// [`StoreError::Coercion`] when the value does not convert to `T`.
    pub fn get<T: Coerce>(&self, key: &str) -> StoreResult<T> {
        let raw = self.require(key)?;
        Ok(coercion::convert(&raw)?)
    }

    /// Reads a value, falling back to `default` when it is missing or does
    /// not convert.
    pub fn get_or<T: Coerce>(&self, key: &str, default: T) -> StoreResult<T> {
        self.get_or_with(key, default, CoercionPolicy::Lenient)
    }

    /// Reads a value, falling back to `default` when it is missing. A value
    /// that does not convert fails under [`CoercionPolicy::Strict`].
    pub fn get_or_with<T: Coerce>(
        &self,
        key: &str,
        default: T,
        policy: CoercionPolicy,
    ) -> StoreResult<T> {
        let raw = self.lookup(key)?;
        Ok(coercion::cast(raw.as_ref(), default, policy)?)
    }

    /// Reads a required list, splitting text on any of `separators` and
    /// converting every element strictly.
    pub fn get_list<T: Coerce>(&self, key: &str, separators: &[char]) -> StoreResult<Vec<T>> {
        let raw = self.require(key)?;
        Ok(coercion::convert_list(&raw, separators)?)
    }

    pub fn get_list_or<T: Coerce>(
        &self,
        key: &str,
        default: Vec<T>,
        separators: &[char],
    ) -> StoreResult<Vec<T>> {
        self.get_list_or_with(key, default, separators, CoercionPolicy::Lenient)
    }

    /// List form of [`get_or_with`](Self::get_or_with). One bad element
    /// rejects the whole list.
    pub fn get_list_or_with<T: Coerce>(
        &self,
        key: &str,
        default: Vec<T>,
        separators: &[char],
        policy: CoercionPolicy,
    ) -> StoreResult<Vec<T>> {
        let raw = self.lookup(key)?;
        Ok(coercion::cast_list(raw.as_ref(), default, separators, policy)?)
    }

    fn lookup(&self, key: &str) -> StoreResult<Option<RawValue>> {
        let raw = self.store.raw_value(key)?;
        debug!(
            event = "core.resolver.lookup_completed",
            store = self.store.name(),
            key = key,
            found = raw.is_some()
        );
        Ok(raw)
    }

    fn require(&self, key: &str) -> StoreResult<RawValue> {
        let not_found = || StoreError::KeyNotFound {
            key: key.to_string(),
        };

        if !self.store.contains_key(key)? {
            return Err(not_found());
        }
        self.lookup(key)?.ok_or_else(not_found)
    }
}

impl<S: WritableStore> Resolver<S> {
    /// Writes `value` under `key` without creating missing containers.
    pub fn set(&mut self, key: &str, value: impl Display) -> StoreResult<()> {
        self.set_with(key, value, false)
    }

    /// Writes the text form of `value` under `key`, creating missing
    /// intermediate containers when `create_if_missing` is true.
    pub fn set_with(
        &mut self,
        key: &str,
        value: impl Display,
        create_if_missing: bool,
    ) -> StoreResult<()> {
        self.store.write(key, &value.to_string(), create_if_missing)?;
        debug!(
            event = "core.resolver.set_completed",
            store = self.store.name(),
            key = key
        );
        Ok(())
    }

    /// Removes the value and any subtree at `key`. Missing keys are ignored.
    pub fn delete(&mut self, key: &str) -> StoreResult<()> {
        self.store.remove(key)?;
        debug!(
            event = "core.resolver.delete_completed",
            store = self.store.name(),
            key = key
        );
        Ok(())
    }
}
