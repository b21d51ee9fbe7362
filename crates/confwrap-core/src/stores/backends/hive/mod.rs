//! Hierarchical (registry-style) stores.
//!
//! A [`Hive`] is a tree of keys under a fixed set of roots; each key holds
//! subkeys and named values. [`HiveStore`] maps canonical keys onto it. Two
//! hives ship with the crate: [`MemoryHive`] and [`DirectoryHive`].

mod directory;
mod memory;
mod store;
mod traits;
mod types;

pub use directory::{DirectoryHive, DirectoryKey};
pub use memory::{MemoryHive, MemoryKey};
pub use store::HiveStore;
pub use traits::{Hive, HiveKey};
pub use types::{Access, HiveValue, RootKey};

const STORE_NAME: &str = "hive";
