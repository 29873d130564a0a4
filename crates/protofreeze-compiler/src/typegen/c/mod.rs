//! C header emission.
//!
//! Two artifacts per schema:
//! - the layout header: runtime support types, one struct per message
//! - the constants header: one enum per schema enum

mod config;
mod emitter;
mod naming;
mod render;


pub use config::Config;
pub use emitter::Emitter;

use protofreeze_core::Schema;

/// Layout header (`<base>.h`).
pub fn emit_layout(schema: &Schema, config: Config) -> String {
    Emitter::new(schema, config).emit_layout()
}

/// Constants header (`<base>_const.h`).
pub fn emit_constants(schema: &Schema, config: Config) -> String {
    Emitter::new(schema, config).emit_constants()
}
