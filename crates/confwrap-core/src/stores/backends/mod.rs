pub mod document;
pub mod environment;
pub mod hive;
pub mod ini;
pub mod memory;

pub use document::{DocumentFormat, DocumentStore};
pub use environment::EnvironmentStore;
pub use hive::HiveStore;
pub use ini::{IniEntry, IniStore};
pub use memory::MemoryStore;
