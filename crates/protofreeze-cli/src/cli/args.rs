//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Schema file (--schema).
pub fn schema_arg() -> Arg {
    Arg::new("schema")
        .short('s')
        .long("schema")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Schema file (JSON)")
}

/// Instance file, or `-` for stdin (positional).
pub fn instance_path_arg() -> Arg {
    Arg::new("instance_path")
        .value_name("INSTANCE")
        .value_parser(value_parser!(PathBuf))
        .help("Instance file (JSON), or - for stdin")
}

/// Exported root identifier (-i/--identifier).
pub fn identifier_arg() -> Arg {
    Arg::new("identifier")
        .short('i')
        .long("identifier")
        .value_name("IDENT")
        .help("C identifier for the exported root; enables the data artifact")
}

/// Artifact base path (-o/--output).
pub fn output_base_arg() -> Arg {
    Arg::new("output_base")
        .short('o')
        .long("output")
        .value_name("BASE")
        .help("Output base path; writes BASE.h, BASE_const.h and BASE.c")
}

/// Output file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output_file")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file instead of stdout")
}

/// Root message type (--root-type).
pub fn root_type_arg() -> Arg {
    Arg::new("root_type")
        .long("root-type")
        .value_name("NAME")
        .help("Message type of the instance (default: first message in the schema)")
}

/// Reorder fields by number (--sort-fields).
pub fn sort_fields_arg() -> Arg {
    Arg::new("sort_fields")
        .long("sort-fields")
        .action(ArgAction::SetTrue)
        .help("Lay out fields in field-number order instead of declaration order")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Log progress to stderr (-vv for more)")
}
