//! Default values for store options.
//!
//! Used both by the `Default` impls and by serde `#[serde(default = "...")]`
//! attributes.

use super::types::{EnvironmentOptions, IniOptions};

/// Key/value delimiters of an INI file (`=`).
pub fn default_ini_delimiters() -> Vec<char> {
    vec!['=']
}

/// Comment markers of an INI file (`;`).
pub fn default_ini_comment_chars() -> Vec<char> {
    vec![';']
}

/// Separator standing for `.` in environment variable names (`__`).
pub fn default_env_separator() -> String {
    "__".to_string()
}

impl Default for IniOptions {
    fn default() -> Self {
        Self {
            delimiters: default_ini_delimiters(),
            comment_chars: default_ini_comment_chars(),
            encoding: Default::default(),
        }
    }
}

impl Default for EnvironmentOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            separator: default_env_separator(),
        }
    }
}
