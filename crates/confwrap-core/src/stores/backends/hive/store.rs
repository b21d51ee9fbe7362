use crate::coercion::RawValue;
use crate::keyspace::{self, KeyCase, NativePath};
use crate::stores::errors::{StoreError, StoreResult};
use crate::stores::traits::{ReadableStore, WritableStore};

use super::STORE_NAME;
use super::traits::{Hive, HiveKey};
use super::types::{Access, HiveValue, RootKey};

const DELIMITERS: [char; 2] = ['\\', '/'];

/// Store over a [`Hive`].
///
/// Keys look like `hkcu\Software\App\port` or `HKEY_CURRENT_USER/Software/App/port`:
/// a root alias, the subkey path, then the value name. Handles are opened per
/// call and released before it returns.
#[derive(Debug, Clone)]
pub struct HiveStore<H> {
    hive: H,
}

/// A key split into root, subkey path and value name.
struct ValuePath<'a> {
    root: RootKey,
    subkeys: Vec<&'a str>,
    value: &'a str,
}

fn invalid_key(key: &str, reason: impl Into<String>) -> StoreError {
    StoreError::InvalidKey {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn resolve_root(key: &str, alias: &str) -> StoreResult<RootKey> {
    RootKey::from_alias(alias).ok_or_else(|| invalid_key(key, format!("unknown root '{}'", alias)))
}

fn parse_value_path(key: &str) -> StoreResult<ValuePath<'_>> {
    let segments = keyspace::split_path(key, &DELIMITERS);
    let (alias, rest) = segments
        .split_first()
        .ok_or_else(|| invalid_key(key, "a root is required"))?;
    let root = resolve_root(key, alias)?;
    let (value, subkeys) = rest
        .split_last()
        .ok_or_else(|| invalid_key(key, "a value name is required after the root"))?;

    Ok(ValuePath {
        root,
        subkeys: subkeys.to_vec(),
        value: *value,
    })
}

impl<H: Hive> HiveStore<H> {
    pub fn new(hive: H) -> Self {
        Self { hive }
    }

    pub fn hive(&self) -> &H {
        &self.hive
    }

    /// Opens `root\subkeys...`, or `None` when a subkey on the way is missing.
    fn open_path(
        &self,
        root: RootKey,
        subkeys: &[&str],
        access: Access,
    ) -> StoreResult<Option<H::Key>> {
        let mut current = self.hive.open_root(root, access)?;
        for name in subkeys {
            match current.open_subkey(name, access)? {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}

impl<H: Hive> ReadableStore for HiveStore<H> {
    fn name(&self) -> &'static str {
        STORE_NAME
    }

    fn delimiter(&self) -> char {
        '\\'
    }

    fn key_case(&self) -> KeyCase {
        KeyCase::Insensitive
    }

    fn raw_value(&self, key: &str) -> StoreResult<Option<RawValue>> {
        let path = parse_value_path(key)?;
        let Some(handle) = self.open_path(path.root, &path.subkeys, Access::Read)? else {
            return Ok(None);
        };
        Ok(handle.value(path.value)?.map(|value| value.to_raw()))
    }

    fn enumerate(&self) -> StoreResult<Vec<NativePath>> {
        Err(StoreError::unsupported(STORE_NAME, "enumerating every key"))
    }

    /// Walks the subtree under the key named by `prefix`.
    ///
    /// Results reuse the prefix as written and join the rest with the first
    /// delimiter found in it (`\` when there is none).
    fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let delimiter = prefix
            .chars()
            .find(|c| DELIMITERS.contains(c))
            .unwrap_or('\\');
        let segments = keyspace::split_path(prefix, &DELIMITERS);
        let (alias, subkeys) = segments
            .split_first()
            .ok_or_else(|| invalid_key(prefix, "a root is required"))?;
        let root = resolve_root(prefix, alias)?;

        let separator = delimiter.to_string();
        let start: Vec<String> = subkeys.iter().map(|name| name.to_string()).collect();
        let mut keys = Vec::new();
        // Pending entries are name paths; a subkey is opened only when popped.
        let mut pending = vec![(segments.join(separator.as_str()), start)];

        while let Some((path, native)) = pending.pop() {
            let names: Vec<&str> = native.iter().map(String::as_str).collect();
            let Some(handle) = self.open_path(root, &names, Access::Read)? else {
                continue;
            };
            for value in handle.value_names()? {
                keys.push(format!("{}{}{}", path, delimiter, value));
            }
            for name in handle.subkey_names()?.into_iter().rev() {
                let mut child = native.clone();
                child.push(name.clone());
                pending.push((format!("{}{}{}", path, delimiter, name), child));
            }
        }

        tracing::debug!(
            event = "core.store.hive.walk_completed",
            prefix = prefix,
            count = keys.len()
        );

        Ok(keys)
    }

    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        Ok(self.raw_value(key)?.is_some())
    }
}

impl<H: Hive> WritableStore for HiveStore<H> {
    fn write(&mut self, key: &str, value: &str, create_missing: bool) -> StoreResult<()> {
        let path = parse_value_path(key)?;
        let mut current = self.hive.open_root(path.root, Access::Write)?;

        for name in &path.subkeys {
            current = match current.open_subkey(name, Access::Write)? {
                Some(child) => child,
                None if create_missing => current.create_subkey(name)?,
                None => {
                    return Err(StoreError::KeyNotFound {
                        key: key.to_string(),
                    });
                }
            };
        }

        current.set_value(path.value, HiveValue::String(value.to_string()))?;

        tracing::info!(event = "core.store.hive.write_completed", key = key);

        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = parse_value_path(key)?;
        let Some(parent) = self.open_path(path.root, &path.subkeys, Access::Write)? else {
            return Ok(());
        };

        parent.delete_value(path.value)?;
        parent.delete_subkey_tree(path.value)?;

        tracing::info!(event = "core.store.hive.remove_completed", key = key);

        Ok(())
    }
}
