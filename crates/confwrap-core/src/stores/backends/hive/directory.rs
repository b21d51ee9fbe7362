//! Hive laid out as a directory tree.
//!
//! ```text
//! <base>/HKEY_CURRENT_USER/Software/App/port    (file holding "8080")
//! ```
//!
//! Roots are `HKEY_*` directories under the base, subkeys are directories and
//! values are UTF-8 files. A single trailing line break in a value file is
//! ignored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::stores::errors::{StoreError, StoreResult};

use super::STORE_NAME;
use super::traits::{Hive, HiveKey};
use super::types::{Access, HiveValue, RootKey};

fn io_error(path: &Path, error: io::Error) -> StoreError {
    StoreError::unavailable(STORE_NAME, format!("{}: {}", path.display(), error))
}

fn check_segment(name: &str) -> StoreResult<()> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(StoreError::InvalidKey {
            key: name.to_string(),
            reason: "not a valid key or value name".to_string(),
        });
    }
    Ok(())
}

/// Hive rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryHive {
    base: PathBuf,
}

impl DirectoryHive {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl Hive for DirectoryHive {
    type Key = DirectoryKey;

    /// A root directory that does not exist yet reads as empty and is created
    /// on first write.
    fn open_root(&self, root: RootKey, access: Access) -> StoreResult<DirectoryKey> {
        if !self.base.is_dir() {
            return Err(StoreError::unavailable(
                STORE_NAME,
                format!("'{}' is not a directory", self.base.display()),
            ));
        }

        let base = DirectoryKey {
            dir: self.base.clone(),
            access,
        };
        let dir = match base.find(root.canonical_name(), EntryKind::Directory)? {
            Some(existing) => existing,
            None => {
                let dir = self.base.join(root.canonical_name());
                if access.can_write() {
                    fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
                }
                dir
            }
        };

        Ok(DirectoryKey { dir, access })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Directory,
    File,
}

/// Open key of a [`DirectoryHive`].
#[derive(Debug)]
pub struct DirectoryKey {
    dir: PathBuf,
    access: Access,
}

impl DirectoryKey {
    /// Sorted `(name, path)` entries of one kind. A missing directory is empty.
    fn list(&self, kind: EntryKind) -> StoreResult<Vec<(String, PathBuf)>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.dir, e)),
        };

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error(&self.dir, e))?;
            let file_type = entry.file_type().map_err(|e| io_error(&entry.path(), e))?;
            let matches = match kind {
                EntryKind::Directory => file_type.is_dir(),
                EntryKind::File => file_type.is_file(),
            };
            if !matches {
                continue;
            }
            // Names that are not valid UTF-8 cannot be addressed by a key.
            if let Ok(name) = entry.file_name().into_string() {
                found.push((name, entry.path()));
            }
        }

        found.sort();
        Ok(found)
    }

    fn find(&self, name: &str, kind: EntryKind) -> StoreResult<Option<PathBuf>> {
        check_segment(name)?;
        Ok(self
            .list(kind)?
            .into_iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, path)| path))
    }

    fn require_write(&self) -> StoreResult<()> {
        if self.access.can_write() {
            Ok(())
        } else {
            Err(StoreError::unavailable(
                STORE_NAME,
                format!("'{}' was opened read-only", self.dir.display()),
            ))
        }
    }
}

impl HiveKey for DirectoryKey {
    fn subkey_names(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .list(EntryKind::Directory)?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    fn value_names(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .list(EntryKind::File)?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    fn open_subkey(&self, name: &str, access: Access) -> StoreResult<Option<DirectoryKey>> {
        Ok(self
            .find(name, EntryKind::Directory)?
            .map(|dir| DirectoryKey { dir, access }))
    }

    fn create_subkey(&self, name: &str) -> StoreResult<DirectoryKey> {
        self.require_write()?;
        let dir = match self.find(name, EntryKind::Directory)? {
            Some(existing) => existing,
            None => {
                let dir = self.dir.join(name);
                fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
                dir
            }
        };
        Ok(DirectoryKey {
            dir,
            access: Access::Write,
        })
    }

    fn value(&self, name: &str) -> StoreResult<Option<HiveValue>> {
        let Some(path) = self.find(name, EntryKind::File)? else {
            return Ok(None);
        };
        let content = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        let content = content
            .strip_suffix('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .unwrap_or(content.as_str());
        Ok(Some(HiveValue::String(content.to_string())))
    }

    fn set_value(&self, name: &str, value: HiveValue) -> StoreResult<()> {
        self.require_write()?;
        let path = self
            .find(name, EntryKind::File)?
            .unwrap_or_else(|| self.dir.join(name));
        let content = match value {
            HiveValue::String(text) => text,
            HiveValue::MultiString(items) => items.join("\n"),
            HiveValue::DWord(number) => number.to_string(),
            HiveValue::QWord(number) => number.to_string(),
        };
        fs::write(&path, content).map_err(|e| io_error(&path, e))
    }

    fn delete_value(&self, name: &str) -> StoreResult<()> {
        self.require_write()?;
        if let Some(path) = self.find(name, EntryKind::File)? {
            fs::remove_file(&path).map_err(|e| io_error(&path, e))?;
        }
        Ok(())
    }

    fn delete_subkey_tree(&self, name: &str) -> StoreResult<()> {
        self.require_write()?;
        if let Some(dir) = self.find(name, EntryKind::Directory)? {
            fs::remove_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
        }
        Ok(())
    }
}
