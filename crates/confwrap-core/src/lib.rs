//! confwrap-core: Typed reads over heterogeneous configuration stores
//!
//! One API for INI files, JSON and TOML documents, registry-style hives and
//! the process environment: list keys, test membership, and read values
//! converted to the type the caller asks for.
//!
//! # Main Entry Points
//!
//! - [`resolver`] - Bind a store and read (or write) typed values
//! - [`stores`] - Store adapters and their capability traits
//! - [`coercion`] - Raw text to typed value conversion
//! - [`keyspace`] - Canonical key model shared by all stores

pub mod coercion;
pub mod errors;
pub mod keyspace;
pub mod logging;
pub mod resolver;
pub mod stores;

// Re-export commonly used types at crate root for convenience
pub use coercion::{Coerce, CoercionError, CoercionPolicy, RawValue};
pub use errors::ConfwrapError;
pub use resolver::{Resolver, StoreSource};
pub use stores::backends::hive::{DirectoryHive, HiveValue, MemoryHive, RootKey};
pub use stores::{
    DocumentStore, EnvironmentOptions, EnvironmentStore, HiveStore, IniOptions, IniStore,
    MemoryStore, ReadableStore, StoreError, StoreResult, TextEncoding, WritableStore,
};

// Re-export logging initialization
pub use logging::init_logging;
