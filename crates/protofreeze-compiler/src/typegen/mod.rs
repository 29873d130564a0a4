//! Header generation from the schema.

pub mod c;
