use crate::stores::errors::StoreResult;

use super::types::{Access, HiveValue, RootKey};

/// An open key. Dropping the handle releases it.
///
/// Name arguments are single path segments. Implementations match names
/// case-insensitively and report them in stored case.
pub trait HiveKey: Sized {
    /// Direct children, sorted.
    fn subkey_names(&self) -> StoreResult<Vec<String>>;

    /// Values held by this key, sorted.
    fn value_names(&self) -> StoreResult<Vec<String>>;

    /// Opens a direct child; `Ok(None)` when it does not exist.
    fn open_subkey(&self, name: &str, access: Access) -> StoreResult<Option<Self>>;

    /// Opens a direct child for writing, creating it when missing.
    fn create_subkey(&self, name: &str) -> StoreResult<Self>;

    fn value(&self, name: &str) -> StoreResult<Option<HiveValue>>;

    fn set_value(&self, name: &str, value: HiveValue) -> StoreResult<()>;

    /// No-op when the value does not exist.
    fn delete_value(&self, name: &str) -> StoreResult<()>;

    /// Deletes a child and everything below it. No-op when missing.
    fn delete_subkey_tree(&self, name: &str) -> StoreResult<()>;
}

/// A hierarchical key/value database with a fixed set of roots.
pub trait Hive: Send + Sync {
    type Key: HiveKey;

    /// Opens a root. Fails with `BackendUnavailable` when access is refused.
    fn open_root(&self, root: RootKey, access: Access) -> StoreResult<Self::Key>;
}
