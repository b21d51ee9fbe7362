//! In-process hive.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::stores::errors::{StoreError, StoreResult};

use super::STORE_NAME;
use super::traits::{Hive, HiveKey};
use super::types::{Access, HiveValue, RootKey};

#[derive(Debug, Default)]
struct Node {
    subkeys: BTreeMap<String, Node>,
    values: BTreeMap<String, HiveValue>,
}

/// Stored spelling of `name` among the keys of `map`, ignoring case.
fn stored_name<'a, V>(map: &'a BTreeMap<String, V>, name: &str) -> Option<&'a String> {
    map.keys().find(|candidate| candidate.eq_ignore_ascii_case(name))
}

impl Node {
    fn descend(&self, path: &[String]) -> Option<&Node> {
        path.iter()
            .try_fold(self, |node, name| node.subkeys.get(name))
    }

    fn descend_mut(&mut self, path: &[String]) -> Option<&mut Node> {
        path.iter()
            .try_fold(self, |node, name| node.subkeys.get_mut(name))
    }
}

#[derive(Debug, Default)]
struct Shared {
    roots: Mutex<HashMap<RootKey, Node>>,
    denied: Mutex<HashSet<RootKey>>,
    open: AtomicUsize,
    peak: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Hive kept in memory, shared between clones.
///
/// Every handle it hands out is counted until dropped, which lets callers
/// check that no operation leaks one.
#[derive(Debug, Clone, Default)]
pub struct MemoryHive {
    shared: Arc<Shared>,
}

impl MemoryHive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles currently alive.
    pub fn open_handles(&self) -> usize {
        self.shared.open.load(Ordering::SeqCst)
    }

    /// Most handles alive at the same time so far.
    pub fn peak_handles(&self) -> usize {
        self.shared.peak.load(Ordering::SeqCst)
    }

    /// Refuses every later `open_root` on `root`.
    pub fn deny_root(&self, root: RootKey) {
        lock(&self.shared.denied).insert(root);
    }

    /// Seeds a value, creating the subkeys on the way.
    pub fn insert(&self, root: RootKey, subkeys: &[&str], name: &str, value: HiveValue) {
        let mut roots = lock(&self.shared.roots);
        let mut node = roots.entry(root).or_default();
        for subkey in subkeys {
            let stored = stored_name(&node.subkeys, subkey)
                .cloned()
                .unwrap_or_else(|| subkey.to_string());
            node = node.subkeys.entry(stored).or_default();
        }
        let stored = stored_name(&node.values, name)
            .cloned()
            .unwrap_or_else(|| name.to_string());
        node.values.insert(stored, value);
    }

    fn handle(&self, root: RootKey, path: Vec<String>, access: Access) -> MemoryKey {
        MemoryKey::new(Arc::clone(&self.shared), root, path, access)
    }
}

impl Hive for MemoryHive {
    type Key = MemoryKey;

    fn open_root(&self, root: RootKey, access: Access) -> StoreResult<MemoryKey> {
        if lock(&self.shared.denied).contains(&root) {
            return Err(StoreError::unavailable(
                STORE_NAME,
                format!("access to {} was denied", root),
            ));
        }
        Ok(self.handle(root, Vec::new(), access))
    }
}

/// Open key of a [`MemoryHive`]. The path holds stored spellings.
#[derive(Debug)]
pub struct MemoryKey {
    shared: Arc<Shared>,
    root: RootKey,
    path: Vec<String>,
    access: Access,
}

impl MemoryKey {
    fn new(shared: Arc<Shared>, root: RootKey, path: Vec<String>, access: Access) -> Self {
        let open = shared.open.fetch_add(1, Ordering::SeqCst) + 1;
        shared.peak.fetch_max(open, Ordering::SeqCst);
        Self {
            shared,
            root,
            path,
            access,
        }
    }

    fn child(&self, name: String, access: Access) -> MemoryKey {
        let mut path = self.path.clone();
        path.push(name);
        MemoryKey::new(Arc::clone(&self.shared), self.root, path, access)
    }

    /// Runs `read` on this key's node; `None` when the key no longer exists.
    fn read<T>(&self, read: impl FnOnce(&Node) -> T) -> Option<T> {
        let roots = lock(&self.shared.roots);
        roots.get(&self.root)?.descend(&self.path).map(read)
    }

    fn modify<T>(&self, modify: impl FnOnce(&mut Node) -> T) -> StoreResult<T> {
        if !self.access.can_write() {
            return Err(StoreError::unavailable(
                STORE_NAME,
                format!("{} was opened read-only", self.display_path()),
            ));
        }

        let mut roots = lock(&self.shared.roots);
        roots
            .entry(self.root)
            .or_default()
            .descend_mut(&self.path)
            .map(modify)
            .ok_or_else(|| {
                StoreError::unavailable(
                    STORE_NAME,
                    format!("{} no longer exists", self.display_path()),
                )
            })
    }

    fn display_path(&self) -> String {
        std::iter::once(self.root.canonical_name())
            .chain(self.path.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\\")
    }
}

impl Drop for MemoryKey {
    fn drop(&mut self) {
        self.shared.open.fetch_sub(1, Ordering::SeqCst);
    }
}

impl HiveKey for MemoryKey {
    fn subkey_names(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .read(|node| node.subkeys.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn value_names(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .read(|node| node.values.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn open_subkey(&self, name: &str, access: Access) -> StoreResult<Option<MemoryKey>> {
        let stored = self
            .read(|node| stored_name(&node.subkeys, name).cloned())
            .flatten();
        Ok(stored.map(|stored| self.child(stored, access)))
    }

    fn create_subkey(&self, name: &str) -> StoreResult<MemoryKey> {
        let stored = self.modify(|node| {
            let stored = stored_name(&node.subkeys, name)
                .cloned()
                .unwrap_or_else(|| name.to_string());
            node.subkeys.entry(stored.clone()).or_default();
            stored
        })?;
        Ok(self.child(stored, Access::Write))
    }

    fn value(&self, name: &str) -> StoreResult<Option<HiveValue>> {
        Ok(self
            .read(|node| {
                stored_name(&node.values, name).and_then(|stored| node.values.get(stored).cloned())
            })
            .flatten())
    }

    fn set_value(&self, name: &str, value: HiveValue) -> StoreResult<()> {
        self.modify(|node| {
            let stored = stored_name(&node.values, name)
                .cloned()
                .unwrap_or_else(|| name.to_string());
            node.values.insert(stored, value);
        })
    }

    fn delete_value(&self, name: &str) -> StoreResult<()> {
        self.modify(|node| {
            node.values
                .retain(|candidate, _| !candidate.eq_ignore_ascii_case(name))
        })
    }

    fn delete_subkey_tree(&self, name: &str) -> StoreResult<()> {
        self.modify(|node| {
            node.subkeys
                .retain(|candidate, _| !candidate.eq_ignore_ascii_case(name))
        })
    }
}
