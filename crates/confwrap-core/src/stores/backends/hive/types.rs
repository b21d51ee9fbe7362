use std::fmt;

use crate::coercion::RawValue;

/// Top-level key of a hive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RootKey {
    LocalMachine,
    CurrentUser,
    CurrentConfig,
}

impl RootKey {
    pub const ALL: [RootKey; 3] = [
        RootKey::LocalMachine,
        RootKey::CurrentUser,
        RootKey::CurrentConfig,
    ];

    /// Resolves a short (`hkcu`) or long (`HKEY_CURRENT_USER`) alias, ignoring case.
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias.to_ascii_lowercase().as_str() {
            "hklm" | "hkey_local_machine" => Some(RootKey::LocalMachine),
            "hkcu" | "hkey_current_user" => Some(RootKey::CurrentUser),
            "hkcc" | "hkey_current_config" => Some(RootKey::CurrentConfig),
            _ => None,
        }
    }

    pub fn canonical_name(self) -> &'static str {
        match self {
            RootKey::LocalMachine => "HKEY_LOCAL_MACHINE",
            RootKey::CurrentUser => "HKEY_CURRENT_USER",
            RootKey::CurrentConfig => "HKEY_CURRENT_CONFIG",
        }
    }
}

impl fmt::Display for RootKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Rights requested when opening a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    pub fn can_write(self) -> bool {
        matches!(self, Access::Write)
    }
}

/// Typed value stored under a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HiveValue {
    String(String),
    MultiString(Vec<String>),
    DWord(u32),
    QWord(u64),
}

impl HiveValue {
    pub fn to_raw(&self) -> RawValue {
        match self {
            HiveValue::String(text) => RawValue::Text(text.clone()),
            HiveValue::MultiString(items) => RawValue::List(items.clone()),
            HiveValue::DWord(number) => RawValue::Text(number.to_string()),
            HiveValue::QWord(number) => RawValue::Text(number.to_string()),
        }
    }
}
