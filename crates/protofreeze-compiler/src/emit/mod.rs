//! Instance flattening and C data emission.
//!
//! The pipeline runs in two strictly separate phases:
//! - `walker` traverses the instance once, filling the string pool and the
//!   per-type buckets
//! - `data` renders the frozen pool and buckets, turning handles into
//!   positional references through `resolve`

mod buckets;
mod data;
mod error;
mod literal;
mod resolve;
mod string_pool;
mod walker;

#[cfg(test)]
mod buckets_tests;
#[cfg(test)]
mod literal_tests;

pub use buckets::{ArraySlot, ArrayWindow, Bucket, BucketRegistry, Slot, TypeKey};
pub use data::emit_data;
pub use error::{EmitError, InternalFault};
pub use literal::{CLiteralFormatter, LiteralFormatter};
pub use resolve::Resolver;
pub use string_pool::{PoolEntry, PoolRef, StringPool, StringPoolBuilder};
pub use walker::{Collected, collect};
