//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("protofreeze")
        .about("Compile a message instance into static, deduplicated C data")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(compile_command())
        .subcommand(dump_command())
        .subcommand(types_command())
}

/// Write the C artifacts.
pub fn compile_command() -> Command {
    Command::new("compile")
        .about("Generate C headers and, with -i, the data file")
        .override_usage(
            "\
  protofreeze compile --schema <FILE> [INSTANCE] [-i <IDENT>] [-o <BASE>]",
        )
        .after_help(
            r#"EXAMPLES:
  protofreeze compile --schema s.json                    # s.h, s_const.h
  protofreeze compile --schema s.json db.json -i db      # db.h, db_const.h, db.c
  protofreeze compile --schema s.json - -i db -o gen/db  # instance from stdin"#,
        )
        .arg(schema_arg())
        .arg(instance_path_arg())
        .arg(identifier_arg())
        .arg(output_base_arg())
        .arg(root_type_arg())
        .arg(sort_fields_arg())
        .arg(verbose_arg())
}

/// Show the flattened string pool and type buckets.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show how an instance is flattened into pools and buckets")
        .after_help(
            r#"EXAMPLES:
  protofreeze dump --schema s.json db.json
  protofreeze dump --schema s.json db.json --root-type pkg.Config"#,
        )
        .arg(schema_arg())
        .arg(instance_path_arg().required(true))
        .arg(root_type_arg())
        .arg(sort_fields_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Print the generated headers.
pub fn types_command() -> Command {
    Command::new("types")
        .about("Print the layout and constants headers for a schema")
        .after_help(
            r#"EXAMPLES:
  protofreeze types --schema s.json
  protofreeze types --schema s.json -o s.h"#,
        )
        .arg(schema_arg())
        .arg(output_file_arg())
        .arg(sort_fields_arg())
        .arg(verbose_arg())
}
