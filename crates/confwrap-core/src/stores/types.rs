//! Store option types.
//!
//! These are plain serde types so embedding applications can keep store
//! settings in their own TOML or JSON configuration.
//!
//! # Example
//!
//! ```toml
//! [ini]
//! delimiters = ["=", ":"]
//! comment_chars = [";", "#"]
//! encoding = "latin1"
//!
//! [environment]
//! prefix = "MYAPP_"
//! separator = "__"
//! ```

use serde::{Deserialize, Serialize};

use super::encoding::TextEncoding;

/// Parsing options for [`IniStore`](super::IniStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IniOptions {
    /// Characters separating a key from its value. The first one found on a
    /// line wins.
    #[serde(default = "super::defaults::default_ini_delimiters")]
    pub delimiters: Vec<char>,

    /// Characters that start a comment line.
    #[serde(default = "super::defaults::default_ini_comment_chars")]
    pub comment_chars: Vec<char>,

    /// File encoding, UTF-8 unless configured.
    #[serde(default)]
    pub encoding: TextEncoding,
}

/// Mapping options for [`EnvironmentStore`](super::EnvironmentStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentOptions {
    /// Only variables starting with this prefix (compared case-insensitively)
    /// are visible; the prefix is stripped from keys.
    #[serde(default)]
    pub prefix: String,

    /// Variable-name sequence standing for the `.` key delimiter.
    #[serde(default = "super::defaults::default_env_separator")]
    pub separator: String,
}

impl EnvironmentOptions {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }
}
