//! Resolver facade.
//!
//! A [`StoreSource`] describes a store without opening it. Binding it yields a
//! [`Resolver`], the only type that reads values; closing the resolver
//! consumes it. A closed or unbound resolver therefore cannot be queried.
//!
//! ```rust
//! use confwrap_core::resolver::Resolver;
//! use confwrap_core::stores::MemoryStore;
//!
//! let store: MemoryStore = [("goodInt", "89"), ("badVal", "chicken")].into_iter().collect();
//! let mut resolver = Resolver::new(store);
//!
//! assert_eq!(resolver.get_or::<i32>("goodInt", 17).unwrap(), 89);
//! assert_eq!(resolver.get_or::<i32>("badVal", 17).unwrap(), 17);
//!
//! resolver.set("retries", 3).unwrap();
//! assert_eq!(resolver.get::<u8>("retries").unwrap(), 3);
//! resolver.close();
//! ```

pub mod handler;
pub mod source;
pub mod types;

pub use handler::Resolver;
pub use types::StoreSource;
