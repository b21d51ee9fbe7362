//! Nested document store (JSON or TOML).
//!
//! The document is parsed once when the store is built and is immutable
//! afterwards. Keys are dotted member paths. A numeric segment (or a bracket
//! suffix such as `items[2]`) selects one array element; a name applied to an
//! array fans out over every element, which is what makes collapsed keys like
//! `servers.host` resolvable.
//!
//! Member names that are empty or contain `.` or `[` are written in quoted
//! bracket form, so `{"log": {"file.level": 1}}` lists as `log['file.level']`.
//! Inside the quotes `\` escapes the next character.

use std::borrow::Cow;
use std::path::Path;

use serde_json::Value;

use crate::coercion::RawValue;
use crate::keyspace::{self, NativePath, Segment};
use crate::stores::encoding::TextEncoding;
use crate::stores::errors::{StoreError, StoreResult};
use crate::stores::traits::ReadableStore;

const STORE_NAME: &str = "document";

/// Source format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// `.toml` files are TOML, anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Toml => "toml",
        }
    }
}

/// Read-only store over a parsed document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStore {
    root: Value,
}

impl DocumentStore {
    /// Wraps an already parsed JSON value.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(content: &str) -> StoreResult<Self> {
        Self::parse(content, DocumentFormat::Json)
    }

    pub fn from_toml_str(content: &str) -> StoreResult<Self> {
        Self::parse(content, DocumentFormat::Toml)
    }

    pub fn parse(content: &str, format: DocumentFormat) -> StoreResult<Self> {
        let parsed = match format {
            DocumentFormat::Json => serde_json::from_str::<Value>(content).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::from_str::<Value>(content).map_err(|e| e.to_string()),
        };

        let root = parsed.map_err(|message| {
            tracing::warn!(
                event = "core.store.document.parse_failed",
                format = format.as_str(),
                error = %message
            );
            StoreError::MalformedSource {
                store: STORE_NAME,
                message,
            }
        })?;

        Ok(Self { root })
    }

    /// Reads and parses a file; the extension selects the format.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        Self::open_as(path, DocumentFormat::from_path(path))
    }

    pub fn open_as(path: impl AsRef<Path>, format: DocumentFormat) -> StoreResult<Self> {
        Self::open_with(path, format, TextEncoding::default())
    }

    /// Reads a file in `encoding` and parses it as `format`.
    pub fn open_with(
        path: impl AsRef<Path>,
        format: DocumentFormat,
        encoding: TextEncoding,
    ) -> StoreResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            tracing::warn!(
                event = "core.store.document.read_failed",
                path = %path.display(),
                error = %e
            );
            StoreError::unavailable(
                STORE_NAME,
                format!("cannot read '{}': {}", path.display(), e),
            )
        })?;

        let content = encoding.decode(&bytes).ok_or_else(|| {
            tracing::warn!(
                event = "core.store.document.decode_failed",
                path = %path.display(),
                encoding = encoding.name()
            );
            StoreError::MalformedSource {
                store: STORE_NAME,
                message: format!("'{}' is not valid {} text", path.display(), encoding),
            }
        })?;

        let store = Self::parse(&content, format)?;

        tracing::info!(
            event = "core.store.document.load_completed",
            path = %path.display(),
            format = format.as_str()
        );

        Ok(store)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }
}

/// One parsed key segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step<'a> {
    Member(Cow<'a, str>),
    Index(usize),
}

/// Splits `a.b[2]['c.d']` into member and index steps.
fn parse_key(key: &str) -> Vec<Step<'_>> {
    let mut steps = Vec::new();
    let mut rest = key;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('.') {
            rest = after;
        } else if let Some(quoted) = rest.strip_prefix("['") {
            let Some((name, after)) = read_quoted(quoted) else {
                steps.push(Step::Member(Cow::Borrowed(rest)));
                break;
            };
            steps.push(Step::Member(Cow::Owned(name)));
            rest = after;
        } else if let Some(inner) = rest.strip_prefix('[') {
            let Some(end) = inner.find(']') else {
                steps.push(Step::Member(Cow::Borrowed(rest)));
                break;
            };
            let index = &inner[..end];
            match index.parse::<usize>() {
                Ok(index) => steps.push(Step::Index(index)),
                Err(_) if index.is_empty() => {}
                Err(_) => steps.push(Step::Member(Cow::Borrowed(index))),
            }
            rest = &inner[end + 1..];
        } else {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            steps.push(Step::Member(Cow::Borrowed(&rest[..end])));
            rest = &rest[end..];
        }
    }

    steps
}

/// Reads a quoted member up to its closing `']`; returns the name and the rest.
fn read_quoted(input: &str) -> Option<(String, &str)> {
    let mut name = String::new();
    let mut escaped = false;

    for (position, c) in input.char_indices() {
        if escaped {
            name.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\'' => {
                return input[position + 1..]
                    .strip_prefix(']')
                    .map(|rest| (name, rest));
            }
            _ => name.push(c),
        }
    }

    None
}

/// Renders a leaf path as a key `parse_key` reads back to the same members.
fn document_key(path: &NativePath) -> String {
    let mut key = String::new();
    for segment in path.segments() {
        let Segment::Name(name) = segment else {
            continue;
        };
        if name.is_empty() || name.contains(['.', '[']) {
            key.push_str("['");
            for c in name.chars() {
                if matches!(c, '\'' | '\\') {
                    key.push('\\');
                }
                key.push(c);
            }
            key.push_str("']");
        } else {
            if !key.is_empty() {
                key.push('.');
            }
            key.push_str(name);
        }
    }
    key
}

/// Follows `steps` from `node`, collecting every node reached.
///
/// Returns whether an array fan-out happened along the way.
fn select<'v>(node: &'v Value, steps: &[Step<'_>], found: &mut Vec<&'v Value>) -> bool {
    let Some((step, rest)) = steps.split_first() else {
        found.push(node);
        return false;
    };

    match (node, step) {
        (Value::Object(map), Step::Member(name)) => match map.get(name.as_ref()) {
            Some(child) => select(child, rest, found),
            None => false,
        },
        (Value::Array(items), Step::Index(index)) => match items.get(*index) {
            Some(child) => select(child, rest, found),
            None => false,
        },
        (Value::Array(items), Step::Member(name)) => match name.parse::<usize>() {
            Ok(index) => match items.get(index) {
                Some(child) => select(child, rest, found),
                None => false,
            },
            Err(_) => {
                for item in items {
                    select(item, steps, found);
                }
                true
            }
        },
        _ => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Raw value of a single reached node. Non-empty objects are internal nodes.
fn leaf_value(value: &Value) -> Option<RawValue> {
    match value {
        Value::Null => None,
        Value::Array(items) => Some(RawValue::List(
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| scalar_text(item).unwrap_or_else(|| item.to_string()))
                .collect(),
        )),
        Value::Object(map) if map.is_empty() => Some(RawValue::List(Vec::new())),
        Value::Object(_) => None,
        scalar => scalar_text(scalar).map(RawValue::Text),
    }
}

impl ReadableStore for DocumentStore {
    fn name(&self) -> &'static str {
        STORE_NAME
    }

    fn raw_value(&self, key: &str) -> StoreResult<Option<RawValue>> {
        let steps = parse_key(key);
        if steps.is_empty() {
            return Ok(None);
        }

        let mut found = Vec::new();
        let fanned_out = select(&self.root, &steps, &mut found);

        if !fanned_out {
            return Ok(found.first().and_then(|node| leaf_value(node)));
        }

        let mut items = Vec::new();
        for node in found {
            match leaf_value(node) {
                Some(RawValue::Text(text)) => items.push(text),
                Some(RawValue::List(nested)) => items.extend(nested),
                None => {}
            }
        }
        Ok((!items.is_empty()).then_some(RawValue::List(items)))
    }

    /// Canonical keys, quoting member names the dotted form cannot carry.
    fn keys(&self) -> StoreResult<Vec<String>> {
        let paths = self
            .enumerate()?
            .iter()
            .map(|path| NativePath::from_names([document_key(path)]))
            .collect::<Vec<_>>();
        Ok(keyspace::normalize(paths, self.delimiter()))
    }

    fn enumerate(&self) -> StoreResult<Vec<NativePath>> {
        let mut leaves = Vec::new();
        let mut pending = vec![(NativePath::new(), &self.root)];

        while let Some((path, node)) = pending.pop() {
            match node {
                Value::Object(map) if !map.is_empty() => {
                    for (name, child) in map.iter().rev() {
                        pending.push((path.child(Segment::Name(name.clone())), child));
                    }
                }
                Value::Array(items) if !items.is_empty() => {
                    for (index, child) in items.iter().enumerate().rev() {
                        pending.push((path.child(Segment::Index(index)), child));
                    }
                }
                _ if path.is_empty() => {}
                _ => leaves.push(path),
            }
        }

        Ok(leaves)
    }
}
