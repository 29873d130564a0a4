//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but stay close to clap:
//! the color choice is still unresolved and verbosity is kept for logging.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::compile::CompileArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::types::TypesArgs;

pub struct CompileParams {
    pub schema_path: PathBuf,
    pub instance_path: Option<PathBuf>,
    pub identifier: Option<String>,
    pub output_base: Option<String>,
    pub root_type: Option<String>,
    pub sort_fields: bool,
    pub verbose: u8,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: schema_path(m),
            instance_path: m.get_one::<PathBuf>("instance_path").cloned(),
            identifier: m.get_one::<String>("identifier").cloned(),
            output_base: m.get_one::<String>("output_base").cloned(),
            root_type: m.get_one::<String>("root_type").cloned(),
            sort_fields: m.get_flag("sort_fields"),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            schema_path: p.schema_path,
            instance_path: p.instance_path,
            identifier: p.identifier,
            output_base: p.output_base,
            root_type: p.root_type,
            sort_fields: p.sort_fields,
        }
    }
}

pub struct DumpParams {
    pub schema_path: PathBuf,
    pub instance_path: PathBuf,
    pub root_type: Option<String>,
    pub sort_fields: bool,
    pub color: ColorChoice,
    pub verbose: u8,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: schema_path(m),
            instance_path: m
                .get_one::<PathBuf>("instance_path")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("-")),
            root_type: m.get_one::<String>("root_type").cloned(),
            sort_fields: m.get_flag("sort_fields"),
            color: parse_color(m),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            schema_path: p.schema_path,
            instance_path: p.instance_path,
            root_type: p.root_type,
            sort_fields: p.sort_fields,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TypesParams {
    pub schema_path: PathBuf,
    pub output: Option<PathBuf>,
    pub sort_fields: bool,
    pub verbose: u8,
}

impl TypesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: schema_path(m),
            output: m.get_one::<PathBuf>("output_file").cloned(),
            sort_fields: m.get_flag("sort_fields"),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<TypesParams> for TypesArgs {
    fn from(p: TypesParams) -> Self {
        Self {
            schema_path: p.schema_path,
            output: p.output,
            sort_fields: p.sort_fields,
        }
    }
}

fn schema_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("schema")
        .cloned()
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
