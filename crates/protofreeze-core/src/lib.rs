#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for protofreeze.
//!
//! Two models, both read-only to the compiler:
//! - **Schema**: message and enum definitions, loaded from JSON and resolved
//!   into ID-indexed structures
//! - **Instance**: one concrete message tree, stored as an arena addressed by
//!   integer handles

mod colors;
pub mod instance;
pub mod json;
pub mod schema;
pub mod utils;

#[cfg(test)]
mod instance_tests;
#[cfg(test)]
mod schema_tests;

pub use colors::Colors;
pub use instance::{
    ArrayHandle, ArrayValue, FieldValue, Instance, InstanceBuilder, InstanceError, MessageValue,
    MsgHandle, ScalarValue, Value,
};
pub use json::{instance_from_json, instance_from_json_str};
pub use schema::{
    CType, EnumDef, EnumId, EnumValue, FieldDef, FieldKind, Label, MessageDef, MessageId,
    ScalarType, Schema, SchemaError,
};
