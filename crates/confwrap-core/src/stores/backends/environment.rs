//! Process environment as an application-settings table.
//!
//! With the default options `DATABASE__HOST` is the key `DATABASE.HOST`, and
//! lookups ignore case. A prefix scopes the table: with prefix `MYAPP_`,
//! `MYAPP_PORT` is the key `PORT` and unrelated variables are hidden.

use std::collections::BTreeMap;

use crate::coercion::RawValue;
use crate::keyspace::{KeyCase, NativePath};
use crate::stores::errors::StoreResult;
use crate::stores::traits::ReadableStore;
use crate::stores::types::EnvironmentOptions;

#[derive(Debug, Clone)]
enum Source {
    /// Re-read on every call.
    Process,
    Snapshot(BTreeMap<String, String>),
}

/// Read-only store over environment variables.
#[derive(Debug, Clone)]
pub struct EnvironmentStore {
    source: Source,
    options: EnvironmentOptions,
}

impl EnvironmentStore {
    /// Store over the live process environment.
    pub fn from_process(options: EnvironmentOptions) -> Self {
        Self {
            source: Source::Process,
            options,
        }
    }

    /// Store over a fixed set of variables.
    pub fn from_vars<I, K, V>(vars: I, options: EnvironmentOptions) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            source: Source::Snapshot(
                vars.into_iter()
                    .map(|(name, value)| (name.into(), value.into()))
                    .collect(),
            ),
            options,
        }
    }

    pub fn options(&self) -> &EnvironmentOptions {
        &self.options
    }

    /// Visible `(key, value)` pairs, prefix stripped and separators mapped to `.`.
    fn entries(&self) -> Vec<(String, String)> {
        let vars: Vec<(String, String)> = match &self.source {
            // Variables that are not valid unicode cannot be addressed by a
            // string key, so they are skipped.
            Source::Process => std::env::vars_os()
                .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
                .collect(),
            Source::Snapshot(vars) => vars
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        };

        vars.into_iter()
            .filter_map(|(name, value)| Some((self.key_for(&name)?, value)))
            .collect()
    }

    /// Maps a variable name to its key, or `None` when the prefix excludes it.
    fn key_for(&self, name: &str) -> Option<String> {
        let prefix = &self.options.prefix;
        let head = name.get(..prefix.len())?;
        if !head.eq_ignore_ascii_case(prefix) {
            return None;
        }

        let rest = &name[prefix.len()..];
        if rest.is_empty() {
            return None;
        }

        if self.options.separator.is_empty() {
            Some(rest.to_string())
        } else {
            Some(rest.replace(self.options.separator.as_str(), "."))
        }
    }
}

impl ReadableStore for EnvironmentStore {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn key_case(&self) -> KeyCase {
        KeyCase::Insensitive
    }

    fn raw_value(&self, key: &str) -> StoreResult<Option<RawValue>> {
        Ok(self
            .entries()
            .into_iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
            .map(|(_, value)| RawValue::from(value)))
    }

    /// Each variable is one flat leaf; its key already carries the `.` delimiters.
    fn enumerate(&self) -> StoreResult<Vec<NativePath>> {
        Ok(self
            .entries()
            .into_iter()
            .map(|(key, _)| NativePath::from_names([key]))
            .collect())
    }
}
