//! Key space model.
//!
//! Every store describes its leaves as [`NativePath`]s: the sequence of object
//! members, sections, subkeys and array positions leading from the root to a
//! leaf. [`normalize`] flattens those paths into canonical keys, the one
//! namespace callers see regardless of backend:
//!
//! | Store     | Native path                          | Canonical key                        |
//! |-----------|--------------------------------------|--------------------------------------|
//! | document  | `servers`, `[0]`, `host`             | `servers.host`                       |
//! | INI       | `Section`, `value`                   | `Section.value`                      |
//! | hive      | `HKEY_CURRENT_USER`, `App`, `port`   | `HKEY_CURRENT_USER\App\port`         |
//! | flat map  | `biff.baz`                           | `biff.baz`                           |
//!
//! Array positions are dropped, so repeated array elements collapse to one key.

pub mod operations;
pub mod types;

pub use operations::{canonical_key, key_matches, normalize, prefix_query, split_path};
pub use types::{KeyCase, NativePath, Segment};
