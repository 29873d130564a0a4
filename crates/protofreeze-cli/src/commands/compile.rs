use std::path::PathBuf;

use protofreeze_compiler::{CLiteralFormatter, CompileConfig, compile};
use tracing::warn;

use super::input_loader::{load_instance, load_schema};
use super::output::{ArtifactPaths, base_from_path, write_artifacts};

pub struct CompileArgs {
    pub schema_path: PathBuf,
    pub instance_path: Option<PathBuf>,
    pub identifier: Option<String>,
    pub output_base: Option<String>,
    pub root_type: Option<String>,
    pub sort_fields: bool,
}

pub fn run(args: CompileArgs) {
    let schema = match load_schema(&args.schema_path, args.sort_fields) {
        Ok(schema) => schema,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    let instance = match &args.instance_path {
        Some(path) => match load_instance(&schema, path, args.root_type.as_deref()) {
            Ok(instance) => Some(instance),
            Err(msg) => {
                eprintln!("error: {}", msg);
                std::process::exit(1);
            }
        },
        None => None,
    };
    if instance.is_some() && args.identifier.is_none() {
        warn!("no root identifier given (-i); writing headers only");
    }

    let base = output_base(&args);
    let paths = match ArtifactPaths::new(&base) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let mut config = CompileConfig::new(&base).command_line(command_line());
    if let Some(ident) = &args.identifier {
        config = config.root_identifier(ident);
    }
    if let Some(path) = &args.instance_path {
        config = config.input_name(path.display().to_string());
    }

    let artifacts = match compile(&schema, instance.as_ref(), &config, &CLiteralFormatter) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = write_artifacts(&paths, &artifacts) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Explicit `-o`, else the instance path, else the schema path.
fn output_base(args: &CompileArgs) -> String {
    if let Some(base) = &args.output_base {
        return base.clone();
    }
    match &args.instance_path {
        Some(path) if path.as_os_str() != "-" => base_from_path(path),
        _ => base_from_path(&args.schema_path),
    }
}

fn command_line() -> String {
    std::env::args().collect::<Vec<_>>().join(" ")
}
