use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::stores::{EnvironmentOptions, IniOptions, TextEncoding};

/// An unbound resolver: which store to open and where its data lives.
///
/// ```toml
/// kind = "ini"
/// path = "/etc/app/settings.ini"
///
/// [options]
/// delimiters = ["=", ":"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreSource {
    Ini {
        path: PathBuf,
        #[serde(default)]
        options: IniOptions,
    },
    Json {
        path: PathBuf,
        #[serde(default)]
        encoding: TextEncoding,
    },
    Toml {
        path: PathBuf,
        #[serde(default)]
        encoding: TextEncoding,
    },
    Environment {
        #[serde(default)]
        options: EnvironmentOptions,
    },
    /// A directory laid out as a hive.
    Hive {
        path: PathBuf,
    },
}

impl StoreSource {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreSource::Ini { .. } => "ini",
            StoreSource::Json { .. } => "json",
            StoreSource::Toml { .. } => "toml",
            StoreSource::Environment { .. } => "environment",
            StoreSource::Hive { .. } => "hive",
        }
    }

    pub fn is_writable(&self) -> bool {
        matches!(self, StoreSource::Hive { .. })
    }
}
