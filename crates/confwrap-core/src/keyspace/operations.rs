use std::collections::HashSet;

use super::types::{KeyCase, NativePath, Segment};

/// Flattens native paths into canonical keys.
///
/// Array positions are dropped and the remaining names joined with
/// `delimiter`. Duplicates (for example one per array element) are removed,
/// keeping the first-seen order. Paths made only of array positions produce no
/// key.
pub fn normalize<I>(paths: I, delimiter: char) -> Vec<String>
where
    I: IntoIterator<Item = NativePath>,
{
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    for path in paths {
        let key = canonical_key(&path, delimiter);
        if key.is_empty() {
            continue;
        }
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }

    keys
}

/// Builds the canonical key of a single path.
pub fn canonical_key(path: &NativePath, delimiter: char) -> String {
    let mut key = String::new();
    for segment in path.segments() {
        if let Segment::Name(name) = segment {
            if !key.is_empty() {
                key.push(delimiter);
            }
            key.push_str(name);
        }
    }
    key
}

/// Returns every key starting with `prefix` (ordinal comparison), preserving order.
pub fn prefix_query<I>(keys: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    keys.into_iter()
        .filter(|key| key.starts_with(prefix))
        .collect()
}

/// Compares two keys under a case policy.
pub fn key_matches(left: &str, right: &str, case: KeyCase) -> bool {
    match case {
        KeyCase::Sensitive => left == right,
        KeyCase::Insensitive => left.eq_ignore_ascii_case(right),
    }
}

/// Splits a key on any of `delimiters`, dropping empty segments.
pub fn split_path<'a>(key: &'a str, delimiters: &[char]) -> Vec<&'a str> {
    key.split(|c: char| delimiters.contains(&c))
        .filter(|segment| !segment.is_empty())
        .collect()
}
