//! protofreeze compiler: turns a schema and one message instance into C.
//!
//! This crate provides the compilation pipeline:
//! - `emit` - instance flattening (string pool, type buckets) and the C data
//!   artifact
//! - `typegen` - C layout and constants headers from the schema
//! - `dump` - human-readable view of the flattened instance

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod dump;
pub mod emit;
pub mod typegen;

#[cfg(test)]
pub mod test_utils;

pub use config::CompileConfig;
pub use emit::{CLiteralFormatter, EmitError, InternalFault, LiteralFormatter};

use protofreeze_core::{Instance, Schema};
use tracing::debug;

/// Errors that can occur during compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Emit(#[from] EmitError),

    /// A root identifier was configured but there is nothing to export.
    #[error("a root identifier was given but no instance")]
    MissingInstance,
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, Error>;

/// Rendered artifacts, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// `<base>.h`
    pub header: String,
    /// `<base>_const.h`
    pub const_header: String,
    /// `<base>.c`, present when a root identifier was configured.
    pub data: Option<String>,
}

/// Compile a schema, and optionally an instance, into C artifacts.
///
/// Every artifact is rendered before this returns, so a failed compile
/// leaves nothing half-written.
pub fn compile(
    schema: &Schema,
    instance: Option<&Instance>,
    config: &CompileConfig,
    formatter: &dyn LiteralFormatter,
) -> Result<Artifacts> {
    let mut types = typegen::c::Config::new(config.output_base());

    let data = match (config.get_root_identifier(), instance) {
        (None, _) => None,
        (Some(_), None) => return Err(Error::MissingInstance),
        (Some(root), Some(instance)) => {
            types = types.root(root, instance.root_type());
            let collected = emit::collect(schema, instance)?;
            Some(emit::emit_data(&collected, config, root, formatter)?)
        }
    };

    let artifacts = Artifacts {
        header: typegen::c::emit_layout(schema, types.clone()),
        const_header: typegen::c::emit_constants(schema, types),
        data,
    };
    debug!(
        header_bytes = artifacts.header.len(),
        data_bytes = artifacts.data.as_ref().map_or(0, String::len),
        "compiled"
    );
    Ok(artifacts)
}
