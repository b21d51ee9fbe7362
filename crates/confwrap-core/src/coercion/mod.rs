//! Value coercion engine.
//!
//! Converts the raw representation a store hands back ([`RawValue`]) into the
//! type a caller asked for, either a scalar ([`cast`]) or a delimited list
//! ([`cast_list`]).
//!
//! Two policies govern what happens when the stored text does not convert:
//!
//! - [`CoercionPolicy::Lenient`] substitutes the caller's default.
//! - [`CoercionPolicy::Strict`] reports a [`CoercionError`].
//!
//! A missing value is never an error, whatever the policy. Lists are
//! all-or-nothing: one bad element yields the whole default list (or the error).
//!
//! ```rust
//! use confwrap_core::coercion::{cast, cast_list, CoercionPolicy, RawValue};
//!
//! let raw = RawValue::from("1,2,3,,");
//! let values: Vec<i32> = cast_list(Some(&raw), vec![], &[','], CoercionPolicy::Strict).unwrap();
//! assert_eq!(values, vec![1, 2, 3]);
//!
//! let raw = RawValue::from("chicken");
//! assert_eq!(cast(Some(&raw), 17, CoercionPolicy::Lenient).unwrap(), 17);
//! ```

pub mod errors;
pub mod operations;
pub mod types;

pub use errors::CoercionError;
pub use operations::{cast, cast_list, convert, convert_list, split_segments};
pub use types::{Coerce, CoercionPolicy, RawValue, TargetKind};
