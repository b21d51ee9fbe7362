//! Flat-file (INI) store.
//!
//! ```ini
//! ; comment
//! foo=bar
//!
//! [Section]
//! value=42
//! ```
//!
//! yields the keys `foo` and `Section.value`. The file is read, decoded with the
//! configured [`TextEncoding`](crate::stores::TextEncoding) and scanned on every
//! call, so edits are visible immediately and no handle outlives a call.

use std::path::{Path, PathBuf};

use crate::coercion::RawValue;
use crate::keyspace::NativePath;
use crate::stores::errors::{StoreError, StoreResult};
use crate::stores::traits::ReadableStore;
use crate::stores::types::IniOptions;

const STORE_NAME: &str = "ini";

/// One `key<delim>value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniEntry {
    /// Enclosing section, `None` above the first section marker.
    pub section: Option<String>,
    pub key: String,
    pub value: String,
}

impl IniEntry {
    /// `section.key`, or `key` at top level.
    pub fn canonical_key(&self) -> String {
        match &self.section {
            Some(section) => format!("{}.{}", section, self.key),
            None => self.key.clone(),
        }
    }

    fn native_path(&self) -> NativePath {
        match &self.section {
            Some(section) => NativePath::from_names([section.as_str(), self.key.as_str()]),
            None => NativePath::from_names([self.key.as_str()]),
        }
    }
}

/// Read-only store over an INI file on disk.
#[derive(Debug, Clone)]
pub struct IniStore {
    path: PathBuf,
    options: IniOptions,
}

impl IniStore {
    /// Store over `path` with `=` delimiters and `;` comments.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, IniOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: IniOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Walks the entries in file order until `visit` returns a value.
    fn scan<T>(&self, mut visit: impl FnMut(IniEntry) -> Option<T>) -> StoreResult<Option<T>> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            tracing::warn!(
                event = "core.store.ini.open_failed",
                path = %self.path.display(),
                error = %e
            );
            StoreError::unavailable(
                STORE_NAME,
                format!("cannot open '{}': {}", self.path.display(), e),
            )
        })?;

        let encoding = self.options.encoding;
        let content = encoding.decode(&bytes).ok_or_else(|| {
            tracing::warn!(
                event = "core.store.ini.decode_failed",
                path = %self.path.display(),
                encoding = encoding.name()
            );
            StoreError::MalformedSource {
                store: STORE_NAME,
                message: format!("'{}' is not valid {} text", self.path.display(), encoding),
            }
        })?;

        let mut section: Option<String> = None;
        for line in content.lines() {
            match parse_line(line, &self.options) {
                IniLine::Section(name) => section = name,
                IniLine::Entry { key, value } => {
                    let entry = IniEntry {
                        section: section.clone(),
                        key,
                        value,
                    };
                    if let Some(found) = visit(entry) {
                        return Ok(Some(found));
                    }
                }
                IniLine::Ignored => {}
            }
        }

        Ok(None)
    }

    /// Every entry in file order, duplicates included.
    pub fn entries(&self) -> StoreResult<Vec<IniEntry>> {
        let mut entries = Vec::new();
        self.scan(|entry| {
            entries.push(entry);
            None::<()>
        })?;
        Ok(entries)
    }
}

enum IniLine {
    /// Section marker; `None` for an empty `[]`.
    Section(Option<String>),
    Entry { key: String, value: String },
    Ignored,
}

fn parse_line(line: &str, options: &IniOptions) -> IniLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return IniLine::Ignored;
    }

    if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
        let name = trimmed[1..trimmed.len() - 1].trim();
        return IniLine::Section((!name.is_empty()).then(|| name.to_string()));
    }

    if trimmed
        .chars()
        .next()
        .is_some_and(|c| options.comment_chars.contains(&c))
    {
        return IniLine::Ignored;
    }

    let Some(position) = trimmed.find(|c: char| options.delimiters.contains(&c)) else {
        return IniLine::Ignored;
    };

    let key = trimmed[..position].trim();
    if key.is_empty() {
        return IniLine::Ignored;
    }

    let delimiter_len = trimmed[position..]
        .chars()
        .next()
        .map(char::len_utf8)
        .unwrap_or(1);
    let value = trimmed[position + delimiter_len..].trim();

    IniLine::Entry {
        key: key.to_string(),
        value: value.to_string(),
    }
}

impl ReadableStore for IniStore {
    fn name(&self) -> &'static str {
        STORE_NAME
    }

    fn raw_value(&self, key: &str) -> StoreResult<Option<RawValue>> {
        self.scan(|entry| (entry.canonical_key() == key).then(|| RawValue::from(entry.value)))
    }

    fn enumerate(&self) -> StoreResult<Vec<NativePath>> {
        let paths: Vec<NativePath> = self.entries()?.iter().map(IniEntry::native_path).collect();

        tracing::debug!(
            event = "core.store.ini.enumerate_completed",
            path = %self.path.display(),
            count = paths.len()
        );

        Ok(paths)
    }

    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        Ok(self
            .scan(|entry| (entry.canonical_key() == key).then_some(()))?
            .is_some())
    }
}
