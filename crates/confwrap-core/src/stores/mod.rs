//! Configuration store adapters.
//!
//! Every store implements [`ReadableStore`]; the mutable ones also implement
//! [`WritableStore`].
//!
//! | Store | Source | Writable | Key case |
//! |---|---|---|---|
//! | [`MemoryStore`] | in-process map | yes | sensitive |
//! | [`IniStore`] | INI file, read per call | no | sensitive |
//! | [`DocumentStore`] | JSON or TOML, parsed once | no | sensitive |
//! | [`HiveStore`] | hierarchical key tree | yes | insensitive |
//! | [`EnvironmentStore`] | environment variables | no | insensitive |

pub mod backends;
mod defaults;
pub mod encoding;
pub mod errors;
pub mod traits;
pub mod types;

pub use backends::{
    DocumentFormat, DocumentStore, EnvironmentStore, HiveStore, IniEntry, IniStore, MemoryStore,
};
pub use encoding::TextEncoding;
pub use errors::{StoreError, StoreResult};
pub use traits::{ReadableStore, WritableStore};
pub use types::{EnvironmentOptions, IniOptions};
